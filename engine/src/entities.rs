//! FILENAME: engine/src/entities.rs
//! Domain record types: employees, loans, inventory, accessories, absences.
//!
//! These mirror the backend payloads (camelCase JSON) and carry the derived
//! domain rules the dashboards depend on: effective loan status, stock
//! urgency, and permanent-assignment handling. Derived values are computed
//! at read time; stored fields are never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::FieldValue;

// ============================================================================
// EMPLOYEE
// ============================================================================

/// Employment status as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "onLeave",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Canonical company id (filters resolve display labels back to this).
    pub company: String,
    pub department: String,
    pub position: String,
    pub status: EmployeeStatus,
    #[serde(default)]
    pub hire_date: Option<DateTime<Utc>>,
    /// Reporting line for the organization chart. `None` marks a root.
    #[serde(default)]
    pub manager_id: Option<String>,
}

impl Record for Employee {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "company" => self.company.as_str().into(),
            "department" => self.department.as_str().into(),
            "position" => self.position.as_str().into(),
            "status" => self.status.label().into(),
            "hireDate" => self.hire_date.into(),
            _ => FieldValue::Empty,
        }
    }
}

// ============================================================================
// LOAN
// ============================================================================

/// Loan status. `Overdue` is never stored by the backend; it only appears
/// as the *effective* status derived at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoanStatus {
    Active,
    Returned,
    Overdue,
}

impl LoanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::Returned => "Returned",
            LoanStatus::Overdue => "Overdue",
        }
    }
}

/// An accessory attached to a loan. Permanent attachments have no expected
/// return date and are skipped by duration/overdue logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedAccessory {
    pub name: String,
    #[serde(default)]
    pub permanent: bool,
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub item_name: String,
    pub category: String,
    pub status: LoanStatus,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
    /// Permanent assignment of the main item: no return date expected.
    #[serde(default)]
    pub permanent: bool,
    #[serde(default)]
    pub accessories: Vec<AssignedAccessory>,
}

impl Loan {
    /// The status reported for all aggregation and table purposes.
    ///
    /// A stored `Active` loan whose return date is strictly in the past
    /// (time of day significant) reads as `Overdue`. Permanent assignments
    /// are excluded from the overdue rule entirely.
    pub fn effective_status(&self, now: DateTime<Utc>) -> LoanStatus {
        if self.permanent {
            return self.status;
        }
        match (self.status, self.return_date) {
            (LoanStatus::Active, Some(due)) if due < now => LoanStatus::Overdue,
            (stored, _) => stored,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == LoanStatus::Overdue
    }

    /// Loan duration in days for table display.
    ///
    /// The day count is inclusive of both endpoints (`+1`). This applies to
    /// the displayed duration only and must not leak into the overdue
    /// comparison. Permanent assignments have no duration.
    pub fn duration_days(&self, now: DateTime<Utc>) -> Option<i64> {
        if self.permanent {
            return None;
        }
        let start = self.start_date?;
        let end = self.return_date.unwrap_or(now);
        Some((end - start).num_days() + 1)
    }
}

impl Record for Loan {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.employee_name.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "employeeId" => self.employee_id.as_str().into(),
            "itemName" => self.item_name.as_str().into(),
            "category" => self.category.as_str().into(),
            "status" => self.status.label().into(),
            "startDate" => self.start_date.into(),
            "returnDate" => self.return_date.into(),
            _ => FieldValue::Empty,
        }
    }
}

// ============================================================================
// INVENTORY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Missing stock data defaults to 0 in the urgency computation.
    #[serde(default)]
    pub available_stock: Option<i64>,
    #[serde(default)]
    pub min_stock: i64,
}

impl InventoryItem {
    /// `availableStock - minStock`; lower (more negative) is more critical.
    pub fn urgency(&self) -> i64 {
        self.available_stock.unwrap_or(0) - self.min_stock
    }
}

impl Record for InventoryItem {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "category" => self.category.as_str().into(),
            "availableStock" => FieldValue::Number(self.available_stock.unwrap_or(0) as f64),
            "minStock" => FieldValue::Number(self.min_stock as f64),
            _ => FieldValue::Empty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub available_stock: Option<i64>,
    #[serde(default)]
    pub min_stock: i64,
}

impl Accessory {
    pub fn urgency(&self) -> i64 {
        self.available_stock.unwrap_or(0) - self.min_stock
    }
}

impl Record for Accessory {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "category" => self.category.as_str().into(),
            "availableStock" => FieldValue::Number(self.available_stock.unwrap_or(0) as f64),
            "minStock" => FieldValue::Number(self.min_stock as f64),
            _ => FieldValue::Empty,
        }
    }
}

// ============================================================================
// LEAVE REQUEST
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Unpaid,
}

impl LeaveType {
    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "vacation",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Unpaid => "unpaid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl Record for LeaveRequest {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.employee_name.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "employeeId" => self.employee_id.as_str().into(),
            "leaveType" => self.leave_type.label().into(),
            "status" => self.status.label().into(),
            "startDate" => self.start_date.into(),
            "endDate" => self.end_date.into(),
            _ => FieldValue::Empty,
        }
    }
}
