//! Brute-Force Simulator
//!
//! Insecure-mode demonstration: replays a known-weak password list against
//! one account through the normal VERIFY/RETRY loop. Candidates are tried
//! one at a time until one verifies, the list runs out, or the attempt
//! budget is spent.

use std::path::Path;
use std::sync::Arc;

use crate::application::authenticate::{Authenticator, LoginOutcome};
use crate::application::input::{PasswordPrompt, PasswordSource, RegistrationSource};
use crate::domain::entity::session::Session;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_number::AccountNumber, account_password::RawPassword};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Wordlist
// ============================================================================

/// Known-weak passwords, one per line
#[derive(Debug, Clone, Default)]
pub struct Wordlist {
    candidates: Vec<String>,
    position: usize,
}

impl Wordlist {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            position: 0,
        }
    }

    /// Parse newline-separated text; blank lines are skipped
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.trim().is_empty()),
        )
    }

    pub async fn load(path: impl AsRef<Path>) -> AuthResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthError::data_access(path, e))?;

        let wordlist = Self::parse(&text);
        tracing::debug!(path = %path.display(), candidates = wordlist.len(), "Loaded wordlist");
        Ok(wordlist)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates handed out so far
    pub fn tried(&self) -> usize {
        self.position
    }

    /// Most recently handed-out candidate
    pub fn last_tried(&self) -> Option<&str> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.candidates.get(i))
            .map(String::as_str)
    }
}

impl PasswordSource for Wordlist {
    fn next_password(&mut self, prompt: &PasswordPrompt<'_>) -> AuthResult<Option<RawPassword>> {
        let Some(candidate) = self.candidates.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;

        tracing::debug!(email = %prompt.email, attempt = prompt.attempt, "Trying weak password");
        Ok(Some(RawPassword::new(candidate.as_str())))
    }
}

// ============================================================================
// Simulator
// ============================================================================

#[derive(Debug)]
pub enum BruteForceOutcome {
    /// No account with that email; one was registered instead
    Registered(AccountNumber),
    /// A candidate verified and a session was opened
    Cracked { password: String, session: Session },
    /// No candidate verified within the list or the attempt budget
    Exhausted,
}

#[derive(Debug)]
pub struct BruteForceReport {
    pub candidates_tried: usize,
    pub outcome: BruteForceOutcome,
}

pub struct BruteForceSimulator<R>
where
    R: AccountRepository,
{
    authenticator: Arc<Authenticator<R>>,
}

impl<R> BruteForceSimulator<R>
where
    R: AccountRepository,
{
    pub fn new(authenticator: Arc<Authenticator<R>>) -> Self {
        Self { authenticator }
    }

    /// Attack one account with the wordlist
    ///
    /// Refused outside insecure mode. An unknown email goes to registration
    /// through `registration`, as an interactive login would.
    pub async fn run<G>(
        &self,
        email: &str,
        wordlist: &mut Wordlist,
        registration: &mut G,
    ) -> AuthResult<BruteForceReport>
    where
        G: RegistrationSource + ?Sized,
    {
        if !self.authenticator.mode().allows_brute_force() {
            return Err(AuthError::BruteForceDisabled);
        }

        let email = self.authenticator.parse_email(email)?;
        tracing::warn!(email = %email, candidates = wordlist.len(), "Brute entry executed");

        let Some(account) = self.authenticator.lookup(&email).await? else {
            let number = self.authenticator.register(&email, registration).await?;
            return Ok(BruteForceReport {
                candidates_tried: 0,
                outcome: BruteForceOutcome::Registered(number),
            });
        };

        let start = wordlist.tried();
        let outcome = match self.authenticator.verify_account(account, wordlist)? {
            LoginOutcome::Authenticated(session) => {
                let password = wordlist.last_tried().unwrap_or_default().to_string();
                tracing::warn!(
                    email = %email,
                    tried = wordlist.tried() - start,
                    "Password recovered from wordlist"
                );
                BruteForceOutcome::Cracked { password, session }
            }
            _ => BruteForceOutcome::Exhausted,
        };

        Ok(BruteForceReport {
            candidates_tried: wordlist.tried() - start,
            outcome,
        })
    }
}
