use chrono::Utc;
use fs_err as fs;
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub instruction: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".forge").join("tx").join(tx.to_string())
}

/// Save the instruction we sent and the raw model text we got back, per
/// transaction, for later inspection of parse failures.
pub fn save_stage(
    stage: &str,
    instruction: &str,
    raw_response: &str,
    tx: Uuid,
    root: &Path,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(root, tx);
    fs::create_dir_all(&dir)?;

    let meta = json!({
        "stage": stage,
        "transaction": tx,
        "timestamp": Utc::now(),
    });
    fs::write(dir.join(format!("{stage}.meta.json")), serde_json::to_string_pretty(&meta)?)?;

    let instruction_path = dir.join(format!("{stage}.instruction.txt"));
    fs::write(&instruction_path, instruction)?;

    let mut response_path = None;
    if save_response {
        let p = dir.join(format!("{stage}.response.txt"));
        fs::write(&p, raw_response)?;
        response_path = Some(p);
    }

    Ok(SavedPaths {
        dir,
        instruction: Some(instruction_path),
        response: response_path,
    })
}

pub fn print_planned_paths(root: &Path, tx: Uuid) {
    let dir = tx_dir(root, tx);
    println!("debug: planned artifacts directory: {}", dir.display());
    std::io::stdout().flush().ok();
}

pub fn print_saved_paths(stage: &str, saved: &SavedPaths) {
    println!("debug[{stage}]: artifacts directory: {}", saved.dir.display());
    if let Some(p) = &saved.instruction {
        println!("debug[{stage}]: instruction saved at: {}", p.display());
    }
    if let Some(p) = &saved.response {
        println!("debug[{stage}]: response saved at: {}", p.display());
    } else {
        println!("debug[{stage}]: response not saved (flag off)");
    }
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_stage_writes_instruction_and_response() {
        let tmp = tempfile::tempdir().unwrap();
        let tx = Uuid::new_v4();
        let saved = save_stage("extension", "do the thing", "model said hi", tx, tmp.path(), true)
            .unwrap();
        let response = saved.response.expect("response path");
        assert_eq!(fs::read_to_string(&response).unwrap(), "model said hi");
        assert!(saved.dir.starts_with(tmp.path()));
    }

    #[test]
    fn response_saving_can_be_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let saved =
            save_stage("workflow", "ins", "raw", Uuid::new_v4(), tmp.path(), false).unwrap();
        assert!(saved.response.is_none());
        assert!(saved.instruction.is_some());
    }
}
