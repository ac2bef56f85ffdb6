//! Fee bills and their per-student obligations.
//!
//! Creating a bill makes the backend fan it out into one unpaid obligation
//! per active student of the target class (or of every class). The ledger
//! view then lets a principal settle obligations one at a time.
//!
//! Settling is irreversible, so it goes through a [`PaymentConfirmation`]
//! first, and the local ledger only changes after the backend accepted it.

use api::{
    class_number, ApiClient, ApiError, FeeBill, FeeStatus, MarkPaidRequest, NewFeeBill,
    StudentFee, Transport,
};
use chrono::{DateTime, NaiveDate, Utc};
use store::KeyValueStore;

/// Suggested bill names.
pub const FEE_TYPES: [&str; 10] = [
    "Monthly Fee",
    "Registration Fee",
    "Annual Fee",
    "Examination Fee",
    "Sports Fee",
    "Library Fee",
    "Lab Fee",
    "Republic Day Fee",
    "Independence Day Fee",
    "Other",
];

/// Raw input of the "create fee bill" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeBillDraft {
    pub name: String,
    pub amount: String,
    pub description: String,
    /// Empty means every class.
    pub target_class: String,
    /// `YYYY-MM-DD`, empty for none.
    pub due_date: String,
}

impl FeeBillDraft {
    pub fn validate(&self) -> Result<NewFeeBill, ApiError> {
        let name = self.name.trim();
        if name.is_empty() || self.amount.trim().is_empty() {
            return Err(ApiError::validation("Please fill in required fields"));
        }
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| ApiError::validation("Amount must be a positive number"))?;
        let due_date = match self.due_date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ApiError::validation("Due date is not a valid date"))?,
            ),
        };
        Ok(NewFeeBill {
            name: name.to_string(),
            amount,
            description: non_empty(&self.description),
            target_class: non_empty(&self.target_class),
            due_date,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Which obligations the ledger shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassFilter {
    #[default]
    All,
    Class(String),
}

impl ClassFilter {
    /// Parse a select value; `"all"` or empty means no filter.
    pub fn from_value(value: &str) -> Self {
        match value {
            "" | "all" => Self::All,
            class => Self::Class(class.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Class(class) => class,
        }
    }

    fn admits(&self, fee: &StudentFee) -> bool {
        match self {
            Self::All => true,
            Self::Class(class) => fee.student_class.as_deref() == Some(class.as_str()),
        }
    }
}

/// Obligations of one fee bill, filtered client-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeLedger {
    obligations: Vec<StudentFee>,
    filter: ClassFilter,
}

impl FeeLedger {
    pub fn new(obligations: Vec<StudentFee>) -> Self {
        Self {
            obligations,
            filter: ClassFilter::All,
        }
    }

    pub fn set_filter(&mut self, filter: ClassFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &ClassFilter {
        &self.filter
    }

    pub fn len(&self) -> usize {
        self.obligations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obligations.is_empty()
    }

    pub fn get(&self, fee_id: &str) -> Option<&StudentFee> {
        self.obligations.iter().find(|f| f.id == fee_id)
    }

    pub fn filtered(&self) -> Vec<&StudentFee> {
        self.obligations
            .iter()
            .filter(|f| self.filter.admits(f))
            .collect()
    }

    pub fn unpaid(&self) -> Vec<&StudentFee> {
        self.filtered().into_iter().filter(|f| !f.is_paid()).collect()
    }

    pub fn paid(&self) -> Vec<&StudentFee> {
        self.filtered().into_iter().filter(|f| f.is_paid()).collect()
    }

    /// Amount still outstanding under the current filter.
    pub fn outstanding(&self) -> f64 {
        self.unpaid().iter().map(|f| f.amount).sum()
    }

    /// Distinct student classes across all obligations, in class order.
    pub fn classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self
            .obligations
            .iter()
            .filter_map(|f| f.student_class.clone())
            .collect();
        classes.sort_by(|a, b| class_number(a).cmp(&class_number(b)).then_with(|| a.cmp(b)));
        classes.dedup();
        classes
    }

    /// Apply a payment the backend confirmed. Only that obligation changes.
    pub fn record_payment(&mut self, fee_id: &str, paid_at: Option<DateTime<Utc>>) -> bool {
        let Some(fee) = self.obligations.iter_mut().find(|f| f.id == fee_id) else {
            return false;
        };
        fee.status = FeeStatus::Paid;
        fee.paid_at = Some(paid_at.unwrap_or_else(Utc::now));
        true
    }
}

/// A pending "mark as paid" awaiting the principal's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub fee: StudentFee,
}

impl PaymentConfirmation {
    pub fn new(fee: StudentFee) -> Self {
        Self { fee }
    }

    pub fn title(&self) -> &'static str {
        "Confirm Payment"
    }

    pub fn message(&self) -> String {
        let student = self.fee.student_name.as_deref().unwrap_or("this student");
        format!(
            "Mark the fee of \u{20b9}{} for {student} as paid? This action cannot be undone.",
            format_amount(self.fee.amount)
        )
    }
}

/// Amount with thousands separators and no trailing `.00`.
pub fn format_amount(amount: f64) -> String {
    let total = (amount * 100.0).round() as i64;
    let whole = total.abs() / 100;
    let cents = total.abs() % 100;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if total < 0 { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

/// Bills and the class list, fetched together.
pub async fn load_fee_overview<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
) -> Result<(Vec<FeeBill>, Vec<String>), ApiError> {
    futures::future::try_join(client.fee_bills(), client.classes()).await
}

/// Validate and create a bill.
pub async fn create_fee_bill<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    draft: &FeeBillDraft,
) -> Result<FeeBill, ApiError> {
    let bill = draft.validate()?;
    let created = client.create_fee_bill(&bill).await?;
    tracing::info!("created fee bill {} for {}", created.name, created.target_label());
    Ok(created)
}

/// Fetch the obligations of a bill into a fresh ledger.
pub async fn load_ledger<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    bill_id: &str,
) -> Result<FeeLedger, ApiError> {
    Ok(FeeLedger::new(client.fee_bill_students(bill_id, None).await?))
}

/// Mark one obligation paid on the backend, then in `ledger`.
///
/// An obligation the ledger already shows as paid is not sent again. On any
/// failure the ledger is left untouched.
pub async fn settle_fee<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    ledger: &mut FeeLedger,
    fee_id: &str,
) -> Result<StudentFee, ApiError> {
    match ledger.get(fee_id) {
        None => return Err(ApiError::validation("Fee not found")),
        Some(fee) if fee.is_paid() => {
            return Err(ApiError::validation("Fee is already marked as paid"))
        }
        Some(_) => {}
    }
    let request = MarkPaidRequest {
        remarks: None,
    };
    let settled = client.mark_fee_paid(fee_id, &request).await?;
    ledger.record_payment(fee_id, settled.paid_at);
    tracing::info!("fee {fee_id} marked paid");
    Ok(settled)
}
