//! Row reconciliation: the SB sheet to users/user_accounts pipeline.
//!
//! Rows are processed strictly sequentially in source order; a user created by
//! one row must be visible to the next row's lookup. Failures are isolated per
//! row and reported at the end of the batch.

use crate::errors::AppError;
use crate::models::{NewAccount, NewUser, ACCOUNT_TYPE_SB, USER_TYPE_SB};
use crate::normalize::{clean_amount, clean_text};
use crate::sheet::{self, columns};
use crate::store::ImportStore;
use bigdecimal::{BigDecimal, Zero};
use calamine::Data;
use std::path::Path;

/// Header label that sometimes reappears embedded mid-sheet.
const HEADER_LABEL: &str = "Account Number";

/// One source row that passed the validity and header gates.
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub full_name: String,
    pub account_number: String,
    pub jestha_balance: BigDecimal,
    pub ashad_balance: BigDecimal,
}

/// Gating outcome for a raw sheet row.
#[derive(Debug)]
pub enum RowGate {
    Valid(SourceRow),
    /// Name or account number absent after cleaning; both are structurally required.
    MissingFields,
    /// A repeated header row embedded in the data.
    HeaderEcho,
}

fn cell(cells: &[Data], idx: usize) -> &Data {
    static EMPTY: Data = Data::Empty;
    cells.get(idx).unwrap_or(&EMPTY)
}

impl SourceRow {
    /// Read the four positional fields and apply the row gates.
    pub fn from_cells(cells: &[Data]) -> RowGate {
        let full_name = clean_text(cell(cells, columns::FULL_NAME));
        let account_number = clean_text(cell(cells, columns::ACCOUNT_NUMBER));

        let (full_name, account_number) = match (full_name, account_number) {
            (Some(name), Some(number)) => (name, number),
            _ => return RowGate::MissingFields,
        };

        if full_name == HEADER_LABEL || account_number == HEADER_LABEL {
            return RowGate::HeaderEcho;
        }

        RowGate::Valid(SourceRow {
            full_name,
            account_number,
            jestha_balance: clean_amount(cell(cells, columns::JESTHA_BALANCE)),
            ashad_balance: clean_amount(cell(cells, columns::ASHAD_BALANCE)),
        })
    }

    /// Balance carried into the store: the later-period (Ashad) figure when
    /// strictly positive, otherwise the earlier-period (Jestha) figure. A zero
    /// later balance does not override an earlier one.
    pub fn effective_balance(&self) -> &BigDecimal {
        if self.ashad_balance > BigDecimal::zero() {
            &self.ashad_balance
        } else {
            &self.jestha_balance
        }
    }
}

/// Result of reconciling one valid row.
#[derive(Debug, PartialEq, Eq)]
pub enum RowOutcome {
    /// A new account was created (the row's success case).
    AccountCreated,
    /// The account existed and its stored balance was overwritten.
    BalanceUpdated,
    /// The account existed with the same balance; no write occurred.
    Unchanged,
}

/// Per-row failure detail kept for the end-of-batch report.
#[derive(Debug)]
pub struct RowError {
    /// 1-based position of the row in the sheet.
    pub row: usize,
    pub message: String,
    pub full_name: String,
    pub account_number: String,
}

/// Outcome totals for one import run.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
    /// Post-hoc count of persisted SB users.
    pub verified_users: i64,
    /// Post-hoc count of persisted SB accounts.
    pub verified_accounts: i64,
}

/// Reconcile one gated row against the store.
///
/// The user lookup keys on either derived natural key (id number or contact
/// number); the account lookup keys on the cleaned account number. Only the
/// balance of an existing account may change, and only on exact inequality.
async fn reconcile_row<S>(store: &S, row: &SourceRow) -> Result<RowOutcome, AppError>
where
    S: ImportStore + Sync + ?Sized,
{
    let candidate = NewUser::for_sb_account(&row.full_name, &row.account_number);

    let user = match store
        .find_user(&candidate.id_number, &candidate.contact_number)
        .await?
    {
        Some(existing) => {
            tracing::debug!(
                "user already exists: {} ({})",
                existing.full_name,
                existing.id
            );
            existing
        }
        None => {
            let created = store.create_user(&candidate).await?;
            tracing::info!("created user {} ({})", created.full_name, created.id);
            created
        }
    };

    let balance = row.effective_balance().clone();
    match store.find_account(&row.account_number).await? {
        None => {
            let account = NewAccount::for_sb_row(&row.account_number, balance);
            let created = store.create_account(&account, user.id).await?;
            tracing::info!("created account {} ({})", row.account_number, created.id);
            Ok(RowOutcome::AccountCreated)
        }
        Some(existing) => {
            if existing.balance != balance {
                store.update_account_balance(existing.id, &balance).await?;
                tracing::info!(
                    "updated balance of account {} to {}",
                    row.account_number,
                    balance
                );
                Ok(RowOutcome::BalanceUpdated)
            } else {
                tracing::debug!("account {} unchanged", row.account_number);
                Ok(RowOutcome::Unchanged)
            }
        }
    }
}

/// Run the reconciliation over raw sheet rows, isolating failures per row.
///
/// No row failure aborts the batch; store errors are recorded with the row's
/// 1-based position and identifying fields, and processing continues.
pub async fn import_rows<'a, S, I>(store: &S, rows: I) -> Result<ImportSummary, AppError>
where
    S: ImportStore + Sync + ?Sized,
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut summary = ImportSummary::default();

    for (idx, cells) in rows.into_iter().enumerate() {
        let row_number = idx + 1;

        let row = match SourceRow::from_cells(cells) {
            RowGate::Valid(row) => row,
            RowGate::MissingFields => {
                tracing::warn!(
                    "skipping row {}: missing name or account number",
                    row_number
                );
                summary.skipped += 1;
                continue;
            }
            RowGate::HeaderEcho => {
                tracing::warn!("skipping repeated header at row {}", row_number);
                summary.skipped += 1;
                continue;
            }
        };

        tracing::info!("processing {} ({})", row.full_name, row.account_number);

        match reconcile_row(store, &row).await {
            Ok(RowOutcome::AccountCreated) => summary.created += 1,
            Ok(RowOutcome::BalanceUpdated) => summary.updated += 1,
            Ok(RowOutcome::Unchanged) => summary.unchanged += 1,
            Err(e) => {
                tracing::error!("row {} failed: {}", row_number, e);
                summary.errors.push(RowError {
                    row: row_number,
                    message: e.to_string(),
                    full_name: row.full_name,
                    account_number: row.account_number,
                });
            }
        }
    }

    Ok(summary)
}

/// Full import: extract the sheet, reconcile every row, verify batch totals.
pub async fn run<S>(
    store: &S,
    workbook_path: &Path,
    sheet_name: &str,
) -> Result<ImportSummary, AppError>
where
    S: ImportStore + Sync + ?Sized,
{
    let range = sheet::read_sheet(workbook_path, sheet_name)?;
    tracing::info!("found {} rows in sheet '{}'", range.height(), sheet_name);

    let mut summary = import_rows(store, range.rows()).await?;

    summary.verified_users = store.count_users(USER_TYPE_SB).await?;
    summary.verified_accounts = store.count_accounts(ACCOUNT_TYPE_SB).await?;

    Ok(summary)
}
