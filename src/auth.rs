use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "SEALKIT_PASSWORD";
pub const KEY_ENV: &str = "SEALKIT_KEY";

/// Reads the password from the environment, stdin or an interactive prompt.
///
/// `stdin_free` is false when stdin carries the payload; the password then
/// has to come from the environment or the terminal.
pub fn read_password(stdin_free: bool) -> Result<Zeroizing<String>> {
    //  SEALKIT_PASSWORD="supersecret" sealkit encrypt --in notes.txt
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    //  echo "supersecret" | sealkit hash
    let stdin = io::stdin();
    if stdin_free && !stdin.is_terminal() {
        let mut pw = Zeroizing::new(String::new());
        stdin.read_line(&mut pw)?;
        trim_newline(&mut pw);

        if pw.is_empty() {
            bail!("No password provided");
        }
        return Ok(pw);
    }

    let pw = Zeroizing::new(
        rpassword::prompt_password("Password: ").context("unable to prompt for a password")?,
    );
    if pw.is_empty() {
        bail!("No password provided");
    }
    Ok(pw)
}

/// Reads the secret key from `key_file`, falling back to `SEALKIT_KEY`.
///
/// File contents are used byte for byte. Trailing line breaks are only
/// stripped from the environment value.
pub fn read_key(key_file: Option<&Path>) -> Result<Zeroizing<Vec<u8>>> {
    let key = match key_file {
        Some(path) => Zeroizing::new(
            fs::read(path)
                .with_context(|| format!("failed to read key file {}", path.display()))?,
        ),
        None => match std::env::var(KEY_ENV) {
            Ok(key) => {
                let mut key = Zeroizing::new(key);
                trim_newline(&mut key);
                Zeroizing::new(key.as_bytes().to_vec())
            }
            Err(_) => bail!("No secret key provided: set {KEY_ENV} or pass --key-file"),
        },
    };

    if key.is_empty() {
        bail!("secret key cannot be empty");
    }
    Ok(key)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
