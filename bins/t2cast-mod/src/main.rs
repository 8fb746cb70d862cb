use clap::Parser;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use t2_config::{toml_config, ModulatorConfig};
use t2_core::debug;
use t2_phy::{BitInterleaver, ComplexSample, ConstellationMap, L1FrameMapper};
use tracing::info;

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> ModulatorConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

/// Read one packed FEC frame and unpack to one bit per byte.
/// Returns None on a clean EOF at a frame boundary.
fn read_fec_frame<R: Read>(reader: &mut R, frame_bits: usize) -> io::Result<Option<Vec<u8>>> {
    let mut packed = vec![0u8; frame_bits / 8];
    let mut filled = 0;
    while filled < packed.len() {
        let n = reader.read(&mut packed[filled..])?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ends inside a FEC frame",
            ));
        }
        filled += n;
    }

    let mut bits = Vec::with_capacity(frame_bits);
    for byte in packed {
        for n in (0..8).rev() {
            bits.push((byte >> n) & 1);
        }
    }
    Ok(Some(bits))
}

fn write_symbols<W: Write>(writer: &mut W, symbols: &[ComplexSample]) -> io::Result<()> {
    for s in symbols {
        writer.write_all(&s.re.to_le_bytes())?;
        writer.write_all(&s.im.to_le_bytes())?;
    }
    Ok(())
}

fn run(cfg: &ModulatorConfig, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut mapper = L1FrameMapper::new(cfg)?;
    let interleaver = BitInterleaver::new(cfg.frame_size, cfg.code_rate, cfg.constellation)?;
    let payload_map = ConstellationMap::for_modulation(cfg.constellation);

    info!(
        "modulator ready: {} cells per payload frame, {} L1-post cells",
        interleaver.cells_per_frame(),
        mapper.l1post_cells()
    );

    let mut input = BufReader::new(File::open(&args.input)?);
    let mut output: BufWriter<Box<dyn Write>> = BufWriter::new(match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    });

    let mut cells = vec![0u8; interleaver.cells_per_frame()];
    let mut t2_frame = 0u64;
    // One T2 frame per iteration: both L1 blocks, then fec_blocks payload
    // frames. A clean EOF is only accepted at a T2 frame boundary.
    while let Some(first) = read_fec_frame(&mut input, interleaver.frame_bits())? {
        mapper.post_mut().frame_idx = (t2_frame % cfg.net.num_t2_frames as u64) as u8;
        write_symbols(&mut output, &mapper.l1pre_symbols())?;
        write_symbols(&mut output, &mapper.l1post_symbols())?;

        let mut bits = first;
        for block in 0..cfg.fec_blocks {
            if block > 0 {
                bits = read_fec_frame(&mut input, interleaver.frame_bits())?
                    .ok_or("input ends inside a T2 frame")?;
            }
            interleaver.interleave(&bits, &mut cells);
            let symbols: Vec<ComplexSample> =
                cells.iter().map(|&c| payload_map.map(c)).collect();
            write_symbols(&mut output, &symbols)?;
        }
        t2_frame += 1;
    }
    info!("input exhausted after {} T2 frames", t2_frame);

    output.flush()?;
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "DVB-T2 L1 signaling and bit interleaving modulator front end",
    long_about = "Reads packed LDPC-coded FEC frames, emits L1-pre/L1-post signaling \
                  cells and interleaved payload cells as interleaved f32 I/Q samples"
)]
struct Args {
    /// Config file (required)
    #[arg(help = "TOML config with transmission parameters")]
    config: String,

    /// Input file with packed FEC frames
    #[arg(help = "Packed FEC frame input (one codeword per frame_bits/8 bytes)")]
    input: String,

    /// Output file for f32 I/Q samples (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    let args = Args::parse();
    let cfg = load_config_from_toml(&args.config);
    let _log_guard = debug::setup_logging_default(cfg.debug_log.clone());

    if let Err(e) = run(&cfg, &args) {
        eprintln!("t2cast-mod: {}", e);
        std::process::exit(1);
    }
}
