/// Compares a stored credential against the one supplied at login.
///
/// Credentials are stored as entered, so this is an exact string comparison.
/// Every login path goes through here.
pub fn credentials_match(stored: &str, supplied: &str) -> bool {
    stored == supplied
}
