use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Work {
    #[serde(rename = "id_obra")]
    pub id: i32,
    #[serde(rename = "nombre_obra")]
    pub name: String,
    #[serde(rename = "ubicacion_obra")]
    pub location: Option<String>,
    #[serde(rename = "tipo_obra")]
    pub kind: Option<String>,
    #[serde(rename = "estado_obra")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WorkInput {
    #[serde(rename = "nombre_obra")]
    pub name: String,
    #[serde(rename = "tipo_obra")]
    pub kind: Option<String>,
    #[serde(rename = "estado_obra")]
    pub status: Option<String>,
    #[serde(rename = "ubicacion_obra")]
    pub location: Option<String>,
}

impl Resource for Work {
    const PATH: &'static str = "/obras";
    type Input = WorkInput;
}
