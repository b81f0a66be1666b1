//! FILENAME: engine/src/lib.rs
//! PURPOSE: Shared domain types for the Plantel reporting core.
//! CONTEXT: Record structs, field values and date helpers consumed by the
//! filter/aggregation engines and the export pipeline.

pub mod dates;
pub mod entities;
pub mod record;
pub mod value;

// Re-export commonly used types at the crate root
pub use dates::{end_of_day_ms, epoch_ms, start_of_day_ms, END_OF_DAY_OFFSET_MS};
pub use entities::{
    Accessory, AssignedAccessory, Employee, EmployeeStatus, InventoryItem, LeaveRequest,
    LeaveStatus, LeaveType, Loan, LoanStatus,
};
pub use record::{EntityCollection, Record};
pub use value::FieldValue;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn loan(status: LoanStatus, return_date: Option<&str>, permanent: bool) -> Loan {
        Loan {
            id: "L-1".to_string(),
            employee_id: "E-1".to_string(),
            employee_name: "Ana Torres".to_string(),
            item_name: "Laptop".to_string(),
            category: "IT".to_string(),
            status,
            start_date: Some(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()),
            return_date: return_date.map(|d| {
                let date: chrono::NaiveDate = d.parse().unwrap();
                date.and_hms_opt(12, 0, 0).unwrap().and_utc()
            }),
            permanent,
            accessories: Vec::new(),
        }
    }

    #[test]
    fn active_loan_past_due_reads_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let l = loan(LoanStatus::Active, Some("2024-01-20"), false);
        assert_eq!(l.effective_status(now), LoanStatus::Overdue);
        // The stored status is untouched.
        assert_eq!(l.status, LoanStatus::Active);
    }

    #[test]
    fn overdue_comparison_is_strict_with_time_of_day() {
        let l = loan(LoanStatus::Active, Some("2024-01-20"), false);
        let due = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();
        // Exactly at the due instant: not yet overdue.
        assert_eq!(l.effective_status(due), LoanStatus::Active);
        let after = due + chrono::Duration::milliseconds(1);
        assert_eq!(l.effective_status(after), LoanStatus::Overdue);
    }

    #[test]
    fn returned_loan_is_never_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let l = loan(LoanStatus::Returned, Some("2024-01-20"), false);
        assert_eq!(l.effective_status(now), LoanStatus::Returned);
    }

    #[test]
    fn permanent_assignment_has_no_duration_and_no_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let l = loan(LoanStatus::Active, Some("2024-01-20"), true);
        assert_eq!(l.effective_status(now), LoanStatus::Active);
        assert_eq!(l.duration_days(now), None);
    }

    #[test]
    fn duration_display_is_inclusive_of_both_endpoints() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let l = loan(LoanStatus::Returned, Some("2024-01-12"), false);
        // Jan 10 -> Jan 12 spans two whole days; display counts three.
        assert_eq!(l.duration_days(now), Some(3));
    }

    #[test]
    fn urgency_defaults_missing_stock_to_zero() {
        let item = InventoryItem {
            id: "I-1".to_string(),
            name: "Cable".to_string(),
            category: "IT".to_string(),
            available_stock: None,
            min_stock: 4,
        };
        assert_eq!(item.urgency(), -4);
    }

    #[test]
    fn record_field_lookup_is_lenient_on_unknown_keys() {
        let item = InventoryItem {
            id: "I-1".to_string(),
            name: "Cable".to_string(),
            category: "IT".to_string(),
            available_stock: Some(2),
            min_stock: 1,
        };
        assert!(item.field("nonexistent").is_empty());
        assert_eq!(item.field("availableStock").as_number(), Some(2.0));
    }

    #[test]
    fn employee_payload_round_trips_camel_case() {
        let json = r#"{
            "id": "E-9",
            "firstName": "Luis",
            "lastName": "Vega",
            "company": "acme",
            "department": "Sales",
            "position": "Rep",
            "status": "onLeave",
            "hireDate": "2023-05-01T00:00:00Z",
            "managerId": "E-1"
        }"#;
        let e: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(e.status, EmployeeStatus::OnLeave);
        assert_eq!(e.display_name(), "Luis Vega");
        assert_eq!(e.field("status"), FieldValue::Text("onLeave".to_string()));
    }
}
