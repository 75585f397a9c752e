use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Employee {
    #[serde(rename = "id_empleado")]
    pub id: i32,
    #[serde(rename = "nombre_empleado")]
    pub name: String,
    #[serde(rename = "tipo_empleado")]
    pub kind: Option<String>,
    // Kept raw: the formatter decides what a non-numeric salary looks like
    #[serde(rename = "salario_fijo_empleado")]
    pub fixed_salary: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EmployeeInput {
    #[serde(rename = "nombre_empleado")]
    pub name: String,
    #[serde(rename = "tipo_empleado")]
    pub kind: Option<String>,
    #[serde(rename = "salario_fijo_empleado")]
    pub fixed_salary: Option<f64>,
}

impl Resource for Employee {
    const PATH: &'static str = "/empleados";
    type Input = EmployeeInput;
}
