use relaywatch_core::conf::load_config;
use serde::Serialize;
use std::path::PathBuf;

pub fn dump(path: PathBuf, json: bool, yaml: bool) -> anyhow::Result<()> {
    let mut cfg = load_config(&path)?;
    cfg.normalize();

    if json && !yaml {
        dump_json(&cfg)
    } else {
        dump_yaml(&cfg)
    }
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
