//! Access token acquisition

use crate::domain::ports::{CommandError, CommandRunner};

/// Run `<gcloud> auth print-access-token` and return its stdout verbatim.
///
/// The output usually ends with a newline; callers trim as needed.
pub fn acquire_access_token<R>(runner: &mut R, gcloud: &str) -> Result<String, CommandError>
where
    R: CommandRunner + ?Sized,
{
    let args = ["auth".to_string(), "print-access-token".to_string()];
    let stdout = runner.run_captured(gcloud, &args)?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}
