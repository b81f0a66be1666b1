//! FILENAME: report-engine/src/org.rs
//! Organization chart tree built from the employee collection.
//!
//! The rendered tree's total height is unknown until a first full render,
//! which is why its export goes through the pagination planner instead of
//! the fixed two-page report path.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use engine::entities::Employee;
use engine::record::Record;

/// One node of the organization chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNode {
    pub employee_id: String,
    pub name: String,
    pub position: String,
    pub children: Vec<OrgNode>,
}

/// Builds the reporting tree in collection discovery order.
///
/// Roots are employees without a manager, plus anyone whose manager id
/// does not resolve within the collection (a dangling reference must not
/// drop the subtree).
pub fn build_org_chart(employees: &[Employee]) -> Vec<OrgNode> {
    let ids: FxHashMap<&str, ()> = employees.iter().map(|e| (e.id.as_str(), ())).collect();

    let mut children_of: FxHashMap<&str, Vec<&Employee>> = FxHashMap::default();
    let mut roots: Vec<&Employee> = Vec::new();

    for e in employees {
        match e.manager_id.as_deref() {
            Some(manager) if ids.contains_key(manager) && manager != e.id => {
                children_of.entry(manager).or_default().push(e);
            }
            _ => roots.push(e),
        }
    }

    roots.iter().map(|e| build_node(e, &children_of)).collect()
}

fn build_node(employee: &Employee, children_of: &FxHashMap<&str, Vec<&Employee>>) -> OrgNode {
    let children = children_of
        .get(employee.id.as_str())
        .map(|kids| kids.iter().map(|k| build_node(k, children_of)).collect())
        .unwrap_or_default();

    OrgNode {
        employee_id: employee.id.clone(),
        name: employee.display_name(),
        position: employee.position.clone(),
        children,
    }
}

/// Total node count, used for rough height estimates in previews.
pub fn node_count(nodes: &[OrgNode]) -> usize {
    nodes
        .iter()
        .map(|n| 1 + node_count(&n.children))
        .sum()
}
