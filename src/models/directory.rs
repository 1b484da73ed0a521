use serde::Serialize;

pub const DEPARTMENTS: [&str; 9] = [
    "Production",
    "Quality Control",
    "Design",
    "Management",
    "Sales",
    "Inventory",
    "Export",
    "Raw Materials",
    "Packaging",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: &'static str,
    pub name: &'static str,
    pub department: &'static str,
}

const EMPLOYEES: [Employee; 13] = [
    Employee { id: "1", name: "John Smith", department: "Production" },
    Employee { id: "2", name: "Sarah Johnson", department: "Production" },
    Employee { id: "3", name: "Mike Wilson", department: "Quality Control" },
    Employee { id: "4", name: "Emily Davis", department: "Quality Control" },
    Employee { id: "5", name: "David Brown", department: "Design" },
    Employee { id: "6", name: "Lisa Garcia", department: "Design" },
    Employee { id: "7", name: "Robert Miller", department: "Management" },
    Employee { id: "8", name: "Jennifer Taylor", department: "Sales" },
    Employee { id: "9", name: "Christopher Anderson", department: "Sales" },
    Employee { id: "10", name: "Amanda Thomas", department: "Inventory" },
    Employee { id: "11", name: "James Martinez", department: "Export" },
    Employee { id: "12", name: "Maria Rodriguez", department: "Raw Materials" },
    Employee { id: "13", name: "Kevin Lee", department: "Packaging" },
];

pub fn employees() -> &'static [Employee] {
    &EMPLOYEES
}

pub fn find_employee(id: &str) -> Option<&'static Employee> {
    EMPLOYEES.iter().find(|e| e.id == id)
}

/// Case-insensitive department match; the full roster when `department` is `None`.
pub fn employees_in(department: Option<&str>) -> Vec<&'static Employee> {
    EMPLOYEES
        .iter()
        .filter(|e| department.map_or(true, |d| e.department.eq_ignore_ascii_case(d)))
        .collect()
}
