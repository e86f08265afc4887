use anyhow::{Context, Result, bail};
use log::{debug, error, info};
use std::ffi::OsStr;
use std::process::Command;
use std::time::Instant;

/// 執行外部工具並回傳 stdout
///
/// stderr 會一併記錄；非零結束碼視為失敗，錯誤訊息帶上工具的 stderr。
pub fn run_command<I, S>(program: &str, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);

    let command_line = describe(&command);
    info!("START: {command_line}");
    let started = Instant::now();

    let output = command
        .output()
        .with_context(|| format!("無法執行 {program}，請確認已安裝並在 PATH 中"))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        error!("{program} 執行失敗 ({}): {}", output.status, stderr.trim());
        bail!("{program} 執行失敗: {}", stderr.trim());
    }

    if !stderr.trim().is_empty() {
        debug!("{program} stderr: {}", stderr.trim());
    }
    info!("END: {program} ({:.2}s)", started.elapsed().as_secs_f64());

    Ok(stdout)
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let mut command = Command::new("montage");
        command.args(["-tile", "3x3", "out.jpg"]);
        assert_eq!(describe(&command), "montage -tile 3x3 out.jpg");
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let result = run_command("thumb-sprites-no-such-tool", ["--version"]);
        assert!(result.is_err());
    }
}
