//! System clipboard through the platform's clipboard commands.

use std::io::Write;
use std::process::{Command, Stdio};

/// Copy `text` to the system clipboard.  Returns `false` when no clipboard
/// command is available or the command failed.
pub fn copy_text(text: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        return run_clip_command("pbcopy", &[], text);
    }

    #[cfg(target_os = "windows")]
    {
        return run_clip_command("cmd", &["/C", "clip"], text);
    }

    #[cfg(target_os = "linux")]
    {
        if std::env::var_os("WAYLAND_DISPLAY").is_some() && run_clip_command("wl-copy", &[], text) {
            return true;
        }
        return run_clip_command("xclip", &["-selection", "clipboard"], text)
            || run_clip_command("xsel", &["--clipboard", "--input"], text);
    }

    #[allow(unreachable_code)]
    false
}

/// Spawn `cmd`, feed `input` on stdin and wait for a zero exit status.
fn run_clip_command(cmd: &str, args: &[&str], input: &str) -> bool {
    let mut child = match Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(c) => c,
        Err(err) => {
            tracing::debug!(cmd, %err, "clipboard command unavailable");
            return false;
        }
    };

    // Dropping stdin closes the pipe so the command sees EOF.
    if let Some(mut stdin) = child.stdin.take() {
        if stdin.write_all(input.as_bytes()).is_err() {
            let _ = child.kill();
            let _ = child.wait();
            return false;
        }
    }

    child.wait().map(|s| s.success()).unwrap_or(false)
}
