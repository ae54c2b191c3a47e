//! MetaDefender Contract Bindings
//!
//! ABI surface of the contracts the console calls, generated with
//! `alloy::sol!`. Only the functions the console uses are declared.
//! Addresses come from the deployment record, never from here.

use alloy::primitives::Address;

use crate::domain::{CertificateInfo as Certificate, GlobalsSnapshot, PolicyInfo as Policy};

alloy::sol! {
    /// Certificate state as stored by LiquidityCertificate.
    struct CertificateInfo {
        uint256 enteredEpochIndex;
        uint256 exitedEpochIndex;
        uint256 rewardDebt;
        uint256 liquidity;
        bool isValid;
    }

    /// Policy state as stored by Policy.
    struct PolicyInfo {
        address beneficiary;
        uint256 coverage;
        uint256 deposit;
        uint256 enteredEpochIndex;
        uint256 duration;
        uint256 timestamp;
        bool isClaimed;
        bool isSettled;
    }

    /// Aggregates reported by GlobalsViewer.
    struct GlobalInfo {
        uint256 totalLiquidity;
        uint256 totalCoverage;
        uint256 freeCapital;
        uint256 rewardPerShare;
        uint256 currentEpoch;
    }

    #[sol(rpc)]
    interface IMetaDefender {
        function certificateProviderEntrance(uint256 amount) external;
        function certificateProviderExit(uint256 certificateId, bool isForce) external;
        function buyPolicy(address beneficiary, uint256 coverage, uint256 duration) external;
        function settlePolicy(uint256 policyId) external;
        function claimRewards(uint256 certificateId) external;
        function getRewards(uint256 certificateId, bool isView) external view returns (uint256);
    }

    #[sol(rpc)]
    interface ILiquidityCertificate {
        function getLiquidityProviders(address owner) external view returns (uint256[] memory);
        function getCertificateInfo(uint256 certificateId) external view returns (CertificateInfo memory);
    }

    #[sol(rpc)]
    interface IPolicy {
        function getPolicies(address beneficiary) external view returns (uint256[] memory);
        function getPolicyInfo(uint256 policyId) external view returns (PolicyInfo memory);
    }

    #[sol(rpc)]
    interface ITestERC20 {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function mint(address to, uint256 amount) external;
    }

    #[sol(rpc)]
    interface IMarketsRegistry {
        function getInsuranceMarkets() external view returns (address[] memory, string[] memory);
        function registerMarket(address metaDefender, address liquidityCertificate, address policy, string memory marketName) external;
        function removeMarket(address metaDefender) external;
    }

    #[sol(rpc)]
    interface IGlobalsViewer {
        function getPremium(uint256 coverage, uint256 duration, address metaDefender) external view returns (uint256);
        function getGlobals() external view returns (GlobalInfo memory);
    }
}

impl CertificateInfo {
    /// Domain view of the certificate `id`.
    pub fn into_domain(self, id: alloy::primitives::U256) -> Certificate {
        Certificate {
            id,
            liquidity: self.liquidity,
            entered_epoch: self.enteredEpochIndex,
            exited_epoch: self.exitedEpochIndex,
            reward_debt: self.rewardDebt,
            is_valid: self.isValid,
        }
    }
}

impl PolicyInfo {
    /// Domain view of the policy `id`.
    pub fn into_domain(self, id: alloy::primitives::U256) -> Policy {
        Policy {
            id,
            beneficiary: self.beneficiary,
            coverage: self.coverage,
            deposit: self.deposit,
            duration_days: self.duration,
            bought_at: self.timestamp.saturating_to::<u64>(),
            is_claimed: self.isClaimed,
            is_settled: self.isSettled,
        }
    }
}

impl From<GlobalInfo> for GlobalsSnapshot {
    fn from(info: GlobalInfo) -> Self {
        Self {
            total_liquidity: info.totalLiquidity,
            total_coverage: info.totalCoverage,
            free_capital: info.freeCapital,
            reward_per_share: info.rewardPerShare,
            current_epoch: info.currentEpoch,
        }
    }
}

/// Pair the registry's parallel id/name arrays.
pub fn pair_registry_entries(
    ids: Vec<Address>,
    names: Vec<String>,
) -> anyhow::Result<Vec<crate::domain::RegisteredMarket>> {
    anyhow::ensure!(
        ids.len() == names.len(),
        "registry returned {} ids but {} names",
        ids.len(),
        names.len()
    );
    Ok(ids
        .into_iter()
        .zip(names)
        .map(|(id, name)| crate::domain::RegisteredMarket { id, name })
        .collect())
}
