//! Wire types of the remote prediction API. Field names on the wire are
//! Portuguese; values such as `receita_total` arrive pre-formatted by the
//! server and are passed through as strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "receita_total")]
    pub total_revenue: String,
    #[serde(rename = "total_vendas")]
    pub total_sales: u64,
    #[serde(rename = "ticket_medio")]
    pub average_ticket: String,
    #[serde(rename = "produto_mais_vendido")]
    pub top_product: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "dias")]
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "vendas_previstas")]
    pub predicted_sales: f64,
    #[serde(rename = "receita_prevista")]
    pub predicted_revenue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "confianca")]
    pub confidence: String,
    #[serde(rename = "predicoes")]
    pub predictions: Vec<PredictionPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    #[serde(rename = "produto")]
    pub product: String,
    #[serde(rename = "vendas")]
    pub sales: u64,
}
