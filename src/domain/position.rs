//! Liquidity certificates, policies and protocol globals.
//!
//! These are the read models the ledger hands back. The console never
//! interprets them beyond the `is_valid` flag used to decide which
//! certificates may be offered for withdrawal or reward operations.

use alloy::primitives::{Address, U256};

use super::amount::format_tokens;

/// Identifier of a liquidity certificate.
pub type CertificateId = U256;

/// Identifier of a purchased policy.
pub type PolicyId = U256;

/// Ledger view of a liquidity certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateInfo {
    /// Certificate identifier.
    pub id: CertificateId,
    /// Liquidity still locked in the certificate (base units).
    pub liquidity: U256,
    /// Epoch the certificate entered the pool.
    pub entered_epoch: U256,
    /// Epoch the certificate exited, zero while still in the pool.
    pub exited_epoch: U256,
    /// Rewards already credited (base units).
    pub reward_debt: U256,
    /// False once fully withdrawn or expired.
    pub is_valid: bool,
}

impl std::fmt::Display for CertificateInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "certificate #{}: liquidity={} entered_epoch={} exited_epoch={} reward_debt={} valid={}",
            self.id,
            format_tokens(self.liquidity),
            self.entered_epoch,
            self.exited_epoch,
            format_tokens(self.reward_debt),
            self.is_valid
        )
    }
}

/// Ledger view of a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInfo {
    /// Policy identifier.
    pub id: PolicyId,
    /// Account paid out on a successful claim.
    pub beneficiary: Address,
    /// Covered amount (base units).
    pub coverage: U256,
    /// Premium deposit (base units).
    pub deposit: U256,
    /// Coverage period in days.
    pub duration_days: U256,
    /// Purchase time (chain seconds).
    pub bought_at: u64,
    /// A claim has been paid.
    pub is_claimed: bool,
    /// The policy has been settled after expiry.
    pub is_settled: bool,
}

impl std::fmt::Display for PolicyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "policy #{}: beneficiary={} coverage={} deposit={} duration={}d bought_at={} claimed={} settled={}",
            self.id,
            self.beneficiary,
            format_tokens(self.coverage),
            format_tokens(self.deposit),
            self.duration_days,
            self.bought_at,
            self.is_claimed,
            self.is_settled
        )
    }
}

/// Protocol-wide figures reported by the globals viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalsSnapshot {
    /// Total capital provided by liquidity certificates.
    pub total_liquidity: U256,
    /// Coverage currently sold.
    pub total_coverage: U256,
    /// Capital not backing any coverage.
    pub free_capital: U256,
    /// Accumulated reward per share.
    pub reward_per_share: U256,
    /// Current epoch index.
    pub current_epoch: U256,
}

impl GlobalsSnapshot {
    /// Lines for display, one figure per line.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("total liquidity: {}", format_tokens(self.total_liquidity)),
            format!("total coverage: {}", format_tokens(self.total_coverage)),
            format!("free capital: {}", format_tokens(self.free_capital)),
            format!("reward per share: {}", self.reward_per_share),
            format!("current epoch: {}", self.current_epoch),
        ]
    }
}

/// Keep only certificates the ledger still reports as valid.
///
/// Order of `certificates` is preserved.
pub fn valid_certificates(certificates: &[CertificateInfo]) -> Vec<CertificateId> {
    certificates
        .iter()
        .filter(|c| c.is_valid)
        .map(|c| c.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert(id: u64, is_valid: bool) -> CertificateInfo {
        CertificateInfo {
            id: U256::from(id),
            liquidity: U256::ZERO,
            entered_epoch: U256::from(1),
            exited_epoch: U256::ZERO,
            reward_debt: U256::ZERO,
            is_valid,
        }
    }

    #[test]
    fn test_valid_filter_keeps_order() {
        let certs = vec![cert(7, true), cert(3, false), cert(5, true)];
        assert_eq!(
            valid_certificates(&certs),
            vec![U256::from(7), U256::from(5)]
        );
    }

    #[test]
    fn test_valid_filter_empty_when_all_withdrawn() {
        let certs = vec![cert(1, false), cert(2, false)];
        assert!(valid_certificates(&certs).is_empty());
    }

    #[test]
    fn test_certificate_display_scales_liquidity() {
        let mut c = cert(4, true);
        c.liquidity = U256::from(1_500_000_000_000_000_000u128);
        let text = c.to_string();
        assert!(text.contains("certificate #4"));
        assert!(text.contains("liquidity=1.5"));
    }
}
