//! FILENAME: report-engine/src/dashboard.rs
//! Aggregation engine - turns a filtered collection into dashboard stats.
//!
//! Each dashboard kind carries its own named rule table. Cards are counts
//! or sums keyed by `data_key`; chart series are categorical breakdowns
//! that preserve the discovery order of first occurrence. The whole result
//! map is built before it is returned, so callers never see a torn state.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

use engine::entities::{
    Accessory, Employee, InventoryItem, LeaveRequest, LeaveStatus, Loan, LoanStatus,
};

use crate::definition::{DashboardConfig, DashboardKind};
use crate::view::{DashboardStats, SeriesPoint};

/// How many items the "most critical stock" breakdown surfaces.
const CRITICAL_STOCK_LIMIT: usize = 5;

// ============================================================================
// INPUT
// ============================================================================

/// Filtered collections for one dashboard kind. The tagged union keeps the
/// per-kind rule tables apart instead of switching on type-name strings.
#[derive(Debug, Clone, Copy)]
pub enum DashboardInput<'a> {
    Employees(&'a [Employee]),
    Loans(&'a [Loan]),
    Inventory {
        items: &'a [InventoryItem],
        accessories: &'a [Accessory],
    },
    Absences(&'a [LeaveRequest]),
}

impl<'a> DashboardInput<'a> {
    pub fn kind(&self) -> DashboardKind {
        match self {
            DashboardInput::Employees(_) => DashboardKind::Employees,
            DashboardInput::Loans(_) => DashboardKind::Loans,
            DashboardInput::Inventory { .. } => DashboardKind::Inventory,
            DashboardInput::Absences(_) => DashboardKind::Absences,
        }
    }
}

// ============================================================================
// COMPUTE
// ============================================================================

/// Computes the complete stats map for a filtered collection.
///
/// `now` pins the effective-status clock so that one computation is
/// internally consistent (and testable).
pub fn compute_stats(input: DashboardInput, now: DateTime<Utc>) -> DashboardStats {
    match input {
        DashboardInput::Employees(employees) => employee_stats(employees),
        DashboardInput::Loans(loans) => loan_stats(loans, now),
        DashboardInput::Inventory { items, accessories } => inventory_stats(items, accessories),
        DashboardInput::Absences(requests) => absence_stats(requests),
    }
}

fn employee_stats(employees: &[Employee]) -> DashboardStats {
    use engine::entities::EmployeeStatus;

    let mut stats = DashboardStats::new();
    stats.insert_scalar("total", employees.len() as f64);
    stats.insert_scalar(
        "active",
        count_where(employees, |e| e.status == EmployeeStatus::Active),
    );
    stats.insert_scalar(
        "inactive",
        count_where(employees, |e| e.status == EmployeeStatus::Inactive),
    );
    stats.insert_scalar(
        "onLeave",
        count_where(employees, |e| e.status == EmployeeStatus::OnLeave),
    );
    stats.insert_series("byDepartment", count_by(employees, |e| e.department.clone()));
    stats.insert_series("byCompany", count_by(employees, |e| e.company.clone()));
    stats.insert_series("byStatus", count_by(employees, |e| e.status.label().to_string()));
    stats
}

fn loan_stats(loans: &[Loan], now: DateTime<Utc>) -> DashboardStats {
    let mut stats = DashboardStats::new();
    stats.insert_scalar("total", loans.len() as f64);
    stats.insert_scalar(
        "active",
        count_where(loans, |l| l.effective_status(now) == LoanStatus::Active),
    );
    stats.insert_scalar(
        "overdue",
        count_where(loans, |l| l.effective_status(now) == LoanStatus::Overdue),
    );
    stats.insert_scalar(
        "returned",
        count_where(loans, |l| l.effective_status(now) == LoanStatus::Returned),
    );
    stats.insert_scalar("permanent", count_where(loans, |l| l.permanent));

    // Duration averages skip permanent assignments (they have none).
    let durations: Vec<i64> = loans.iter().filter_map(|l| l.duration_days(now)).collect();
    let average = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<i64>() as f64 / durations.len() as f64
    };
    stats.insert_scalar("averageDuration", average);

    stats.insert_series(
        "byStatus",
        count_by(loans, |l| l.effective_status(now).label().to_string()),
    );
    stats.insert_series("byCategory", count_by(loans, |l| l.category.clone()));
    stats
}

fn inventory_stats(items: &[InventoryItem], accessories: &[Accessory]) -> DashboardStats {
    let mut stats = DashboardStats::new();
    stats.insert_scalar("totalItems", items.len() as f64);
    stats.insert_scalar("totalAccessories", accessories.len() as f64);

    let total_stock: i64 = items
        .iter()
        .map(|i| i.available_stock.unwrap_or(0))
        .chain(accessories.iter().map(|a| a.available_stock.unwrap_or(0)))
        .sum();
    stats.insert_scalar("totalStock", total_stock as f64);

    let below_minimum = count_where(items, |i| i.urgency() < 0)
        + count_where(accessories, |a| a.urgency() < 0);
    stats.insert_scalar("belowMinimum", below_minimum);

    stats.insert_series("byCategory", count_by(items, |i| i.category.clone()));
    stats.insert_series("mostCritical", most_critical(items, accessories));
    stats
}

fn absence_stats(requests: &[LeaveRequest]) -> DashboardStats {
    let mut stats = DashboardStats::new();
    stats.insert_scalar("total", requests.len() as f64);
    stats.insert_scalar(
        "pending",
        count_where(requests, |r| r.status == LeaveStatus::Pending),
    );
    stats.insert_scalar(
        "approved",
        count_where(requests, |r| r.status == LeaveStatus::Approved),
    );
    stats.insert_scalar(
        "rejected",
        count_where(requests, |r| r.status == LeaveStatus::Rejected),
    );
    stats.insert_series("byType", count_by(requests, |r| r.leave_type.label().to_string()));
    stats.insert_series("byStatus", count_by(requests, |r| r.status.label().to_string()));
    stats
}

// ============================================================================
// HELPERS
// ============================================================================

fn count_where<T>(records: &[T], predicate: impl Fn(&T) -> bool) -> f64 {
    records.iter().filter(|r| predicate(r)).count() as f64
}

/// Groups records by a categorical attribute and counts per group.
/// Group order is the discovery order of first occurrence, not
/// alphabetical.
fn count_by<T>(records: &[T], key_of: impl Fn(&T) -> String) -> Vec<SeriesPoint> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut series: Vec<SeriesPoint> = Vec::new();
    for record in records {
        let key = key_of(record);
        match index.get(&key) {
            Some(&i) => series[i].value += 1.0,
            None => {
                index.insert(key.clone(), series.len());
                series.push(SeriesPoint::new(key, 1.0));
            }
        }
    }
    series
}

/// Ascending urgency sort surfaces the items with the least stock slack
/// first; ties keep collection order (stable sort).
fn most_critical(items: &[InventoryItem], accessories: &[Accessory]) -> Vec<SeriesPoint> {
    let mut ranked: Vec<(String, i64)> = items
        .iter()
        .map(|i| (i.name.clone(), i.urgency()))
        .chain(accessories.iter().map(|a| (a.name.clone(), a.urgency())))
        .collect();
    ranked.sort_by_key(|(_, urgency)| *urgency);
    ranked
        .into_iter()
        .take(CRITICAL_STOCK_LIMIT)
        .map(|(name, urgency)| SeriesPoint::new(name, urgency as f64))
        .collect()
}

// ============================================================================
// CONFIG VALIDATION
// ============================================================================

/// Data keys each kind's rule table produces. Used only to warn about
/// configuration typos at load time; lookups stay lenient at render time.
pub fn known_keys(kind: DashboardKind) -> &'static [&'static str] {
    match kind {
        DashboardKind::Employees => &[
            "total", "active", "inactive", "onLeave", "byDepartment", "byCompany", "byStatus",
        ],
        DashboardKind::Loans => &[
            "total",
            "active",
            "overdue",
            "returned",
            "permanent",
            "averageDuration",
            "byStatus",
            "byCategory",
        ],
        DashboardKind::Inventory => &[
            "totalItems",
            "totalAccessories",
            "totalStock",
            "belowMinimum",
            "byCategory",
            "mostCritical",
        ],
        DashboardKind::Absences => &[
            "total", "pending", "approved", "rejected", "byType", "byStatus",
        ],
    }
}

/// Checks every configured `data_key` against the kind's rule table and
/// returns the unknown ones. Misses are logged as warnings, never errors:
/// an unknown card renders as 0 and an unknown chart as absent.
pub fn validate_config(kind: DashboardKind, config: &DashboardConfig) -> Vec<String> {
    let known = known_keys(kind);
    let mut misses = Vec::new();

    let configured = config
        .cards
        .iter()
        .map(|c| c.data_key.as_str())
        .chain(config.charts.iter().map(|c| c.data_key.as_str()));

    for data_key in configured {
        if !known.contains(&data_key) {
            log::warn!(
                "dashboard config for '{}' references unknown dataKey '{}'; it will render as 0/absent",
                kind.label(),
                data_key
            );
            misses.push(data_key.to_string());
        }
    }
    misses
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use engine::entities::EmployeeStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    fn employee(id: u32, status: EmployeeStatus, department: &str) -> Employee {
        Employee {
            id: format!("E-{id}"),
            first_name: "T".to_string(),
            last_name: format!("{id}"),
            company: "acme".to_string(),
            department: department.to_string(),
            position: "Clerk".to_string(),
            status,
            hire_date: None,
            manager_id: None,
        }
    }

    #[test]
    fn active_card_counts_matching_status() {
        let mut staff = Vec::new();
        for i in 0..5 {
            staff.push(employee(i, EmployeeStatus::Active, "Ops"));
        }
        for i in 5..12 {
            staff.push(employee(i, EmployeeStatus::Inactive, "Ops"));
        }
        let stats = compute_stats(DashboardInput::Employees(&staff), now());
        assert_eq!(stats.card_value("total"), 12.0);
        assert_eq!(stats.card_value("active"), 5.0);
    }

    #[test]
    fn breakdown_preserves_discovery_order() {
        let staff = vec![
            employee(1, EmployeeStatus::Active, "Sales"),
            employee(2, EmployeeStatus::Active, "IT"),
            employee(3, EmployeeStatus::Active, "Sales"),
            employee(4, EmployeeStatus::Active, "Admin"),
        ];
        let stats = compute_stats(DashboardInput::Employees(&staff), now());
        let series = stats.series("byDepartment").unwrap();
        let names: Vec<&str> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Sales", "IT", "Admin"]);
        assert_eq!(series[0].value, 2.0);
    }

    #[test]
    fn unknown_card_key_reads_zero() {
        let stats = compute_stats(DashboardInput::Employees(&[]), now());
        assert_eq!(stats.card_value("noSuchRule"), 0.0);
        assert!(stats.series("noSuchRule").is_none());
    }

    #[test]
    fn loan_cards_use_effective_status() {
        let due = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let loans = vec![
            Loan {
                id: "L-1".to_string(),
                employee_id: "E-1".to_string(),
                employee_name: "Ana".to_string(),
                item_name: "Laptop".to_string(),
                category: "IT".to_string(),
                status: LoanStatus::Active,
                start_date: None,
                return_date: Some(due),
                permanent: false,
                accessories: Vec::new(),
            },
            Loan {
                id: "L-2".to_string(),
                employee_id: "E-2".to_string(),
                employee_name: "Luis".to_string(),
                item_name: "Monitor".to_string(),
                category: "IT".to_string(),
                status: LoanStatus::Active,
                start_date: None,
                return_date: None,
                permanent: true,
                accessories: Vec::new(),
            },
        ];
        let stats = compute_stats(DashboardInput::Loans(&loans), now());
        assert_eq!(stats.card_value("overdue"), 1.0);
        assert_eq!(stats.card_value("active"), 1.0);
        assert_eq!(stats.card_value("permanent"), 1.0);
        // The overdue loan shows under "Overdue" in the breakdown too.
        let by_status = stats.series("byStatus").unwrap();
        assert_eq!(by_status[0].name, "Overdue");
    }

    #[test]
    fn critical_ranking_puts_deficit_items_first() {
        let items = vec![
            InventoryItem {
                id: "I-1".to_string(),
                name: "Mouse".to_string(),
                category: "IT".to_string(),
                available_stock: Some(10),
                min_stock: 2,
            },
            InventoryItem {
                id: "I-2".to_string(),
                name: "Dock".to_string(),
                category: "IT".to_string(),
                available_stock: Some(1),
                min_stock: 5,
            },
            InventoryItem {
                id: "I-3".to_string(),
                name: "Cable".to_string(),
                category: "IT".to_string(),
                available_stock: None,
                min_stock: 3,
            },
        ];
        let stats = compute_stats(
            DashboardInput::Inventory {
                items: &items,
                accessories: &[],
            },
            now(),
        );
        let critical = stats.series("mostCritical").unwrap();
        assert_eq!(critical[0].name, "Dock"); // urgency -4
        assert_eq!(critical[1].name, "Cable"); // urgency -3
        assert_eq!(critical[2].name, "Mouse"); // urgency 8
        assert_eq!(stats.card_value("belowMinimum"), 2.0);
    }

    #[test]
    fn validation_flags_unknown_keys_only() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{
                "cards": [
                    {"id": "c1", "title": "Total", "dataKey": "total"},
                    {"id": "c2", "title": "Typo", "dataKey": "totle"}
                ],
                "charts": [
                    {"id": "g1", "title": "Depts", "dataKey": "byDepartment", "type": "bar"}
                ]
            }"#,
        )
        .unwrap();
        let misses = validate_config(DashboardKind::Employees, &config);
        assert_eq!(misses, vec!["totle".to_string()]);
    }
}
