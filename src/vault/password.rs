// Passbank — Password Generator

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of generated passwords.
pub const PASSWORD_LEN: usize = 10;

const MIN_DIGITS: usize = 3;

/// Generate a random alphanumeric password with at least one lowercase
/// letter, one uppercase letter and three digits.
///
/// Whole candidates are drawn from a CSPRNG and rejected until one satisfies
/// the policy; roughly one draw in five passes.
pub fn generate_password() -> String {
    let mut rng = rand::rng();
    loop {
        let candidate: String = (&mut rng)
            .sample_iter(Alphanumeric)
            .take(PASSWORD_LEN)
            .map(char::from)
            .collect();

        if meets_policy(&candidate) {
            return candidate;
        }
    }
}

/// Character-class check applied to generated candidates.
pub fn meets_policy(candidate: &str) -> bool {
    candidate.chars().any(|c| c.is_ascii_lowercase())
        && candidate.chars().any(|c| c.is_ascii_uppercase())
        && candidate.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_DIGITS
}

// ─── Tests ───────────────────────────────────────────────────────────────────
