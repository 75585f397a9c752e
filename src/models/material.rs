use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Material {
    #[serde(rename = "id_material")]
    pub id: i32,
    #[serde(rename = "nombre_material")]
    pub name: String,
    #[serde(rename = "unidad_material")]
    pub unit: Option<String>,
    #[serde(rename = "precio_unitario_material")]
    pub unit_price: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MaterialInput {
    #[serde(rename = "nombre_material")]
    pub name: String,
    #[serde(rename = "unidad_material")]
    pub unit: Option<String>,
    #[serde(rename = "precio_unitario_material")]
    pub unit_price: Option<f64>,
}

impl Resource for Material {
    const PATH: &'static str = "/materiales";
    type Input = MaterialInput;
}
