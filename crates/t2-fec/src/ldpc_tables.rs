//! LDPC parity address tables for the 16200-bit frame class
//!
//! Each row lists the parity bit addresses checked by the first bit of a
//! group of 360 information bits; the remaining 359 follow by the q-shift
//! rule. Only the rates used by L1 signaling are carried here.

/// Rate 1/4, 16200-bit frames (q = 36). Used by L1-pre.
pub const LDPC_TAB_1_4S: [&[u16]; 9] = [
    &[6295, 9626, 304, 7695, 4839, 4936, 1660, 144, 11203, 5567, 6347, 12557],
    &[10691, 4988, 3859, 3734, 3071, 3494, 7687, 10313, 5964, 8069, 8296, 11090],
    &[10774, 3613, 5208, 11177, 7676, 3549, 8746, 6583, 7239, 12265, 2674, 4292],
    &[11869, 3708, 5981, 8718, 4908, 10650, 6805, 3334, 2627, 10461, 9285, 11120],
    &[7844, 3079, 10773],
    &[3385, 10854, 5747],
    &[1360, 12010, 12202],
    &[6189, 4241, 2343],
    &[9840, 12726, 4977],
];

/// Rate 1/2, 16200-bit frames (q = 25). Used by L1-post.
pub const LDPC_TAB_1_2S: [&[u16]; 20] = [
    &[20, 712, 2386, 6354, 4061, 1062, 5045, 5158],
    &[21, 2543, 5748, 4822, 2348, 3089, 6328, 5876],
    &[22, 926, 5701, 269, 3693, 2438, 3190, 3507],
    &[23, 2802, 4520, 3577, 5324, 1091, 4667, 4449],
    &[24, 5140, 2003, 1263, 4742, 6497, 1185, 6202],
    &[0, 4046, 6934],
    &[1, 2855, 66],
    &[2, 6694, 212],
    &[3, 3439, 1158],
    &[4, 3850, 4422],
    &[5, 5924, 290],
    &[6, 1467, 4049],
    &[7, 7820, 2242],
    &[8, 4606, 3080],
    &[9, 4633, 7877],
    &[10, 3884, 6868],
    &[11, 8935, 4996],
    &[12, 3028, 764],
    &[13, 5988, 1057],
    &[14, 7411, 3450],
];
