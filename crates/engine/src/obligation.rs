//! Behaviour shared by receivables and payables.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Keyed, MoneyCents};

/// A dated amount owed to or by the business.
///
/// Both receivables and payables move through the same statuses except for
/// the final one (`received` vs `paid`). The views only care about two
/// questions, answered here:
///
/// - [`is_settled`]: money already moved (`received` / `paid`);
/// - [`is_outstanding`]: money still expected (`pending`, `partial`,
///   `scheduled`). `overdue` is neither.
///
/// [`is_settled`]: Obligation::is_settled
/// [`is_outstanding`]: Obligation::is_outstanding
pub trait Obligation: Keyed {
    fn description(&self) -> &str;
    fn amount(&self) -> MoneyCents;
    fn due_date(&self) -> NaiveDate;
    fn company_id(&self) -> Option<Uuid>;
    fn is_settled(&self) -> bool;
    fn is_outstanding(&self) -> bool;
}
