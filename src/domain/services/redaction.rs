//! Secret redaction for command log lines
//!
//! Two flags carry secrets:
//! - `--oauth2_access_token <token>`: the whole following argument is secret
//! - `-E <key>:<value>`: the value part of the following argument is secret
//!
//! Redaction works on the argument vector rather than on the joined display
//! string, so a value is hidden completely whatever it contains: spaces,
//! newlines, or a JSON object with nested braces.

/// Placeholder shown instead of a secret value
pub const REDACTED: &str = "[redacted]";

const TOKEN_FLAG: &str = "--oauth2_access_token";
const ENV_FLAG: &str = "-E";

#[derive(Debug, Clone, Copy)]
enum Secret {
    Token,
    EnvValue,
}

fn secret_after(flag: &str) -> Option<Secret> {
    match flag {
        TOKEN_FLAG => Some(Secret::Token),
        ENV_FLAG => Some(Secret::EnvValue),
        _ => None,
    }
}

/// Return a copy of `args` with every secret value replaced by [`REDACTED`].
pub fn redact<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut pending = None;

    for arg in args {
        let arg = arg.as_ref();
        let shown = match pending.take() {
            Some(Secret::Token) => REDACTED.to_string(),
            Some(Secret::EnvValue) => redact_env_pair(arg),
            None => {
                pending = secret_after(arg);
                redact_inline(arg)
            }
        };
        out.push(shown);
    }

    out
}

/// Redact `args` and join them with single spaces for a log line.
pub fn redact_args<S: AsRef<str>>(args: &[S]) -> String {
    redact(args).join(" ")
}

// KEY:VALUE keeps the key visible
fn redact_env_pair(pair: &str) -> String {
    match pair.split_once(':') {
        Some((key, _)) => format!("{key}:{REDACTED}"),
        None => REDACTED.to_string(),
    }
}

// --oauth2_access_token=TOKEN passed as a single argument
fn redact_inline(arg: &str) -> String {
    match arg.strip_prefix(TOKEN_FLAG).and_then(|rest| rest.strip_prefix('=')) {
        Some(_) => format!("{TOKEN_FLAG}={REDACTED}"),
        None => arg.to_string(),
    }
}
