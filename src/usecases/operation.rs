//! Operation Catalog - The Fixed Console Menu
//!
//! Every menu entry is an `Operation` variant. `ALL` is the menu in
//! display order; handlers are bound to variants in
//! `handlers::execute`, so adding an entry without a handler does not
//! compile.

/// A console menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
  GetRewards,
  ClaimRewards,
  ProvideLiquidity,
  LiquidityWithdraw,
  BuyPolicy,
  SettlePolicy,
  QueryMyAccount,
  QueryInsurancePrice,
  QueryGlobalViews,
  CalculatePremium,
  RegisterMarket,
  QueryMarketAddresses,
  TimeTravel,
  GiveMeSomeTestToken,
  Approve,
  Transfer,
  MyAddress,
  ChooseAddress,
  AddMarket,
  RemoveMarket,
  Exit,
}

impl Operation {
  /// The menu, in display order.
  pub const ALL: [Self; 21] = [
    Self::GetRewards,
    Self::ClaimRewards,
    Self::ProvideLiquidity,
    Self::LiquidityWithdraw,
    Self::BuyPolicy,
    Self::SettlePolicy,
    Self::QueryMyAccount,
    Self::QueryInsurancePrice,
    Self::QueryGlobalViews,
    Self::CalculatePremium,
    Self::RegisterMarket,
    Self::QueryMarketAddresses,
    Self::TimeTravel,
    Self::GiveMeSomeTestToken,
    Self::Approve,
    Self::Transfer,
    Self::MyAddress,
    Self::ChooseAddress,
    Self::AddMarket,
    Self::RemoveMarket,
    Self::Exit,
  ];

  /// Menu label.
  pub fn label(self) -> &'static str {
    match self {
      Self::GetRewards => "Get Rewards",
      Self::ClaimRewards => "Claim Rewards",
      Self::ProvideLiquidity => "Provide Liquidity",
      Self::LiquidityWithdraw => "Liquidity Withdraw",
      Self::BuyPolicy => "Buy Policy",
      Self::SettlePolicy => "Settle Policy",
      Self::QueryMyAccount => "Query My Account",
      Self::QueryInsurancePrice => "Query Insurance Price",
      Self::QueryGlobalViews => "Query Global Views",
      Self::CalculatePremium => "Calculate Premium",
      Self::RegisterMarket => "Register Market",
      Self::QueryMarketAddresses => "Query Market Addresses",
      Self::TimeTravel => "Time Travel",
      Self::GiveMeSomeTestToken => "Give Me Some Test Token",
      Self::Approve => "Approve",
      Self::Transfer => "Transfer",
      Self::MyAddress => "My Address",
      Self::ChooseAddress => "Choose Address",
      Self::AddMarket => "Add Market",
      Self::RemoveMarket => "Remove Market",
      Self::Exit => "Exit",
    }
  }

  /// Menu labels in display order.
  pub fn menu() -> Vec<String> {
    Self::ALL.iter().map(|op| op.label().to_string()).collect()
  }

  /// Whether choosing this operation ends the session.
  pub fn is_terminal(self) -> bool {
    self == Self::Exit
  }
}

impl std::fmt::Display for Operation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}
