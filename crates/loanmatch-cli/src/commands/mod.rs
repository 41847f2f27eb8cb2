pub mod closing_costs;
pub mod dti;
pub mod payment;
pub mod refinance;
pub mod rent_vs_buy;
