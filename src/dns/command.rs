use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Error, Debug)]
pub enum NetshError {
    #[error("Failed to start netsh: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("netsh exited with {}: {message}", exit_code_label(.code))]
    NonZeroExit { code: Option<i32>, message: String },
    #[error("Administrator privileges are required")]
    PermissionDenied,
}

pub type Result<T> = std::result::Result<T, NetshError>;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code".to_string(),
    }
}

pub(crate) fn normalize_error_message(msg: &str) -> String {
    msg.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs `netsh` with `args` and returns stdout. Success is the exit status;
/// output is only decoded, never inspected here.
pub async fn run_netsh(args: &[&str]) -> Result<String> {
    let mut command = Command::new("netsh");
    command.args(args);

    #[cfg(windows)]
    command.creation_flags(CREATE_NO_WINDOW);

    debug!(?args, "running netsh");
    let output = command.output().await.map_err(NetshError::Spawn)?;

    if !output.status.success() {
        // netsh reports most failures on stdout.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = if stderr.trim().is_empty() {
            normalize_error_message(&stdout)
        } else {
            normalize_error_message(&stderr)
        };
        return Err(NetshError::NonZeroExit {
            code: output.status.code(),
            message,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Executes one netsh invocation and returns its stdout.
#[allow(async_fn_in_trait)]
pub trait NetshRunner {
    async fn run(&self, args: &[&str]) -> Result<String>;
}

/// Spawns the real `netsh` binary.
#[derive(Clone, Copy, Default, Debug)]
pub struct SystemNetsh;

impl NetshRunner for SystemNetsh {
    async fn run(&self, args: &[&str]) -> Result<String> {
        run_netsh(args).await
    }
}

const ELEVATION_MARKERS: &[&str] = &["elevation", "access is denied"];

// Failures netsh reports the same way with or without administrator rights.
const NON_PRIVILEGE_MARKERS: &[&str] = &[
    "not found",
    "not valid",
    "invalid",
    "incorrect",
    "syntax",
    "does not exist",
    "not recognized",
];

fn needs_elevation(message: &str, elevated: Option<bool>) -> bool {
    let message = message.to_lowercase();
    if ELEVATION_MARKERS.iter().any(|m| message.contains(m)) {
        return true;
    }
    elevated == Some(false) && !NON_PRIVILEGE_MARKERS.iter().any(|m| message.contains(m))
}

/// Turns a failed configuration call into `PermissionDenied` when the cause is
/// recognisable as missing elevation. Messages that name another cause keep
/// their `NonZeroExit` even when the process is not elevated.
pub fn classify_failure(error: NetshError, elevated: Option<bool>) -> NetshError {
    match error {
        NetshError::NonZeroExit { ref message, .. } if needs_elevation(message, elevated) => {
            NetshError::PermissionDenied
        }
        other => other,
    }
}
