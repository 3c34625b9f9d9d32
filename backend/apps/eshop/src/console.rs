//! Console input sources
//!
//! Terminal-backed implementations of the auth crate's password and
//! registration sources. End of input is reported as `None`.

use std::io::{self, BufRead, Write};

use auth::application::{PasswordPrompt, PasswordSource, RegistrationSource};
use auth::models::{Address, Email, Profile, RawPassword, StrengthViolation};
use auth::{AuthError, AuthResult};

/// Print `label` and read one line from stdin
pub fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn read(label: &str) -> AuthResult<Option<String>> {
    prompt(label).map_err(|e| AuthError::Internal(format!("Console input failed: {e}")))
}

/// Passwords typed at the terminal
#[derive(Debug, Default)]
pub struct ConsolePasswords;

impl PasswordSource for ConsolePasswords {
    fn next_password(&mut self, prompt: &PasswordPrompt<'_>) -> AuthResult<Option<RawPassword>> {
        if prompt.attempt > 1 {
            println!("Password incorrect, try again. Attempts remaining: {}", prompt.remaining);
        }
        Ok(read(&format!("Password for {}", prompt.email))?.map(RawPassword::new))
    }
}

/// Registration details typed at the terminal
#[derive(Debug, Default)]
pub struct ConsoleRegistration;

impl RegistrationSource for ConsoleRegistration {
    fn choose_password(
        &mut self,
        email: &Email,
        rejected: &[StrengthViolation],
    ) -> AuthResult<Option<RawPassword>> {
        if rejected.is_empty() {
            println!("No account found for {email}. Creating a new account.");
        } else {
            println!("Password too weak. It needs:");
            for violation in rejected {
                println!("  - {violation}");
            }
        }
        Ok(read("Choose a password")?.map(RawPassword::new))
    }

    fn profile(&mut self, _email: &Email) -> AuthResult<Option<Profile>> {
        let mut fields = Vec::with_capacity(6);
        for label in [
            "Name",
            "Surname",
            "Address line 1",
            "Address line 2",
            "Postcode",
            "Phone",
        ] {
            match read(label)? {
                Some(value) => fields.push(value.trim().to_string()),
                None => return Ok(None),
            }
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(Some(Profile {
            name: next(),
            surname: next(),
            address: Address {
                line1: next(),
                line2: next(),
                postcode: next(),
            },
            phone: next(),
        }))
    }
}
