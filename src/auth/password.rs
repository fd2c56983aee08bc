use tracing::error;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
#[cfg(test)]
pub(crate) const TEST_COST: u32 = 4;

pub fn hash_password(plain: &str, cost: u32) -> anyhow::Result<String> {
    bcrypt::hash(plain, cost).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e.to_string())
    })
}

/// A hash that cannot be parsed counts as a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(ok) => ok,
        Err(e) => {
            error!(error = %e, "bcrypt verify error");
            false
        }
    }
}
