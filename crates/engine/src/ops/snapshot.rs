use crate::{ResultEngine, Snapshot};

use super::Engine;

impl Engine {
    /// Read all five collections concurrently.
    ///
    /// Any failing read fails the whole load; no partial snapshot is returned.
    pub async fn load_snapshot(&self) -> ResultEngine<Snapshot> {
        let (companies, transactions, receivables, payables, fixed_expenses) = tokio::try_join!(
            self.list_companies(),
            self.list_transactions(),
            self.list_receivables(),
            self.list_payables(),
            self.list_fixed_expenses(),
        )?;

        Ok(Snapshot {
            companies,
            transactions,
            receivables,
            payables,
            fixed_expenses,
        })
    }
}
