use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use t2_core::{
    CodeRate, ConfigErr, FecFrameSize, FftSize, GuardInterval, L1Modulation, Modulation,
    PaprMode, PilotPattern, Preamble, StreamType,
};
use t2_fec::get_code_params;

use super::modulator_config::{CfgNetInfo, ModulatorConfig};

/// Build a `ModulatorConfig` from a TOML configuration string.
pub fn from_toml_str(toml_str: &str) -> Result<ModulatorConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if !root.modulator.extra.is_empty() {
        return Err(
            format!("Unrecognized fields in modulator: {:?}", sorted_keys(&root.modulator.extra)).into()
        );
    }
    if let Some(ref net) = root.net_info {
        if !net.extra.is_empty() {
            return Err(
                format!("Unrecognized fields in net_info: {:?}", sorted_keys(&net.extra)).into()
            );
        }
    }

    let m = root.modulator;

    // Reject combinations without coding parameters up front
    get_code_params(m.frame_size, m.code_rate)?;

    if m.fec_blocks == 0 || m.fec_blocks >= 1 << 10 {
        return Err(ConfigErr::InvalidValue {
            field: "fec_blocks",
            value: m.fec_blocks as u64,
            max: (1 << 10) - 1,
        }
        .into());
    }

    let mut cfg = ModulatorConfig {
        frame_size: m.frame_size,
        code_rate: m.code_rate,
        constellation: m.constellation,
        rotation: m.rotation.unwrap_or(false),
        fec_blocks: m.fec_blocks,
        time_il_length: m.time_il_length.unwrap_or(3),
        extended_carrier: m.extended_carrier.unwrap_or(false),
        fft_size: m.fft_size,
        guard_interval: m.guard_interval,
        l1_constellation: m.l1_constellation,
        pilot_pattern: m.pilot_pattern,
        papr: m.papr.unwrap_or(PaprMode::Off),
        preamble: m.preamble.unwrap_or(Preamble::T2Siso),
        stream_type: m.stream_type.unwrap_or(StreamType::Ts),
        net: CfgNetInfo::default(),
        debug_log: root.debug_log,
    };

    if let Some(net) = root.net_info {
        apply_net_info_patch(&mut cfg.net, net)?;
    }

    Ok(cfg)
}

/// Build a `ModulatorConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<ModulatorConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader
        .read_to_string(&mut contents)
        .map_err(|e| ConfigErr::FileErr { reason: e.to_string() })?;
    from_toml_str(&contents)
}

/// Build a `ModulatorConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ModulatorConfig, Box<dyn std::error::Error>> {
    let f = File::open(&path).map_err(|e| ConfigErr::FileErr {
        reason: format!("{}: {}", path.as_ref().display(), e),
    })?;
    let r = BufReader::new(f);
    from_reader(r)
}

fn apply_net_info_patch(dst: &mut CfgNetInfo, src: NetInfoDto) -> Result<(), ConfigErr> {
    if let Some(v) = src.frequency {
        dst.frequency = v;
    }
    if let Some(v) = src.network_id {
        dst.network_id = v;
    }
    if let Some(v) = src.t2_system_id {
        dst.t2_system_id = v;
    }
    if let Some(v) = src.cell_id {
        dst.cell_id = v;
    }
    if let Some(v) = src.num_t2_frames {
        // Frame indices are taken modulo this value, so zero is invalid
        if v == 0 {
            return Err(ConfigErr::InvalidValue {
                field: "num_t2_frames",
                value: 0,
                max: u8::MAX as u64,
            });
        }
        dst.num_t2_frames = v;
    }
    if let Some(v) = src.num_data_symbols {
        if v >= 1 << 12 {
            return Err(ConfigErr::InvalidValue {
                field: "num_data_symbols",
                value: v as u64,
                max: (1 << 12) - 1,
            });
        }
        dst.num_data_symbols = v;
    }
    Ok(())
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    modulator: ModulatorDto,

    #[serde(default)]
    net_info: Option<NetInfoDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct ModulatorDto {
    frame_size: FecFrameSize,
    code_rate: CodeRate,
    constellation: Modulation,
    rotation: Option<bool>,
    fec_blocks: u16,
    time_il_length: Option<u8>,
    extended_carrier: Option<bool>,
    fft_size: FftSize,
    guard_interval: GuardInterval,
    l1_constellation: L1Modulation,
    pilot_pattern: PilotPattern,
    papr: Option<PaprMode>,
    preamble: Option<Preamble>,
    stream_type: Option<StreamType>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct NetInfoDto {
    frequency: Option<u32>,
    network_id: Option<u16>,
    t2_system_id: Option<u16>,
    cell_id: Option<u16>,
    num_t2_frames: Option<u8>,
    num_data_symbols: Option<u16>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
config_version = "0.1"

[modulator]
frame_size = "Short"
code_rate = "1/2"
constellation = "16QAM"
fec_blocks = 16
fft_size = "2K"
guard_interval = "1/32"
l1_constellation = "QPSK"
pilot_pattern = "PP7"
"#;

    #[test]
    fn test_minimal_config() {
        let cfg = from_toml_str(BASE).unwrap();
        assert_eq!(cfg.frame_size, FecFrameSize::Short);
        assert_eq!(cfg.code_rate, CodeRate::R1_2);
        assert_eq!(cfg.constellation, Modulation::Qam16);
        assert_eq!(cfg.fft_size, FftSize::Fft2k);
        assert_eq!(cfg.l1_constellation, L1Modulation::Qpsk);
        // Defaults
        assert!(!cfg.rotation);
        assert_eq!(cfg.time_il_length, 3);
        assert_eq!(cfg.net.network_id, 0x3085);
        assert_eq!(cfg.net.t2_system_id, 0x8001);
    }

    #[test]
    fn test_net_info_overrides() {
        let toml = format!(
            "{}\n[net_info]\nfrequency = 650000000\nnetwork_id = 12345\nnum_data_symbols = 200\n",
            BASE
        );
        let cfg = from_toml_str(&toml).unwrap();
        assert_eq!(cfg.net.frequency, 650_000_000);
        assert_eq!(cfg.net.network_id, 12345);
        assert_eq!(cfg.net.num_data_symbols, 200);
        assert_eq!(cfg.net.num_t2_frames, 2);
    }

    #[test]
    fn test_wrong_version_rejected() {
        let toml = BASE.replace("0.1", "9.9");
        assert!(from_toml_str(&toml).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = format!("{}\nbogus_key = 1\n", BASE);
        let err = from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("bogus_key"));
    }

    #[test]
    fn test_unknown_modulator_key_rejected() {
        let toml = BASE.replace("fec_blocks = 16", "fec_blocks = 16\ntypo_field = true");
        let err = from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("typo_field"));
    }

    #[test]
    fn test_invalid_combination_rejected() {
        let toml = BASE
            .replace("\"Short\"", "\"Normal\"")
            .replace("\"1/2\"", "\"1/3\"");
        let err = from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("no coding parameters"));
    }

    #[test]
    fn test_field_range_checked() {
        let toml = BASE.replace("fec_blocks = 16", "fec_blocks = 2000");
        assert!(from_toml_str(&toml).is_err());
        let toml = BASE.replace("fec_blocks = 16", "fec_blocks = 0");
        assert!(from_toml_str(&toml).is_err());
    }

    #[test]
    fn test_missing_file_reported() {
        let err = from_file("/nonexistent/t2cast.toml").unwrap_err();
        assert!(err.to_string().contains("config file error"));
        assert!(err.to_string().contains("t2cast.toml"));
    }

    #[test]
    fn test_zero_t2_frames_rejected() {
        // Frame indices wrap modulo num_t2_frames, so zero must not load
        let toml = format!("{}\n[net_info]\nnum_t2_frames = 0\n", BASE);
        let err = from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("num_t2_frames"));
    }
}
