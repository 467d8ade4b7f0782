use crate::aggregate::TableView;
use crate::record::ProjectionMetric;
use crate::utils::{format_currency_brl, format_date_br};
use crate::DashboardView;

/// Text presentation adapter: renders a dashboard view as markdown, CSV or
/// JSON. Holds plain data only; chart-instance lifecycle belongs to whatever
/// consumes the view.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    view: DashboardView,
}

impl DashboardReport {
    pub fn new(view: DashboardView) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.view)
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        let stats = &self.view.stats;

        output.push_str("# Relatório de Vendas\n\n");

        output.push_str("## Estatísticas\n\n");
        output.push_str(&format!("- Total de vendas: {}\n", stats.total_sales));
        output.push_str(&format!("- Unidades vendidas: {}\n", stats.total_units));
        output.push_str(&format!(
            "- Receita total: {}\n",
            format_currency_brl(stats.total_revenue)
        ));
        output.push_str(&format!(
            "- Ticket médio: {}\n",
            format_currency_brl(stats.average_ticket)
        ));
        output.push_str(&format!(
            "- Produto mais vendido: {}\n\n",
            stats.top_product.as_deref().unwrap_or("N/A")
        ));

        output.push_str("## Receita por período\n\n");
        output.push_str("| Período | Receita | Unidades |\n");
        output.push_str("|---|---|---|\n");
        for point in &self.view.series {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                point.chart_key(self.view.granularity),
                format_currency_brl(point.revenue),
                point.units
            ));
        }
        output.push('\n');

        output.push_str("## Detalhamento\n\n");
        match &self.view.table {
            TableView::Records(rows) => {
                output.push_str(
                    "| Data | Medicamento | Categoria | Qtd | Preço unitário | Total | Cidade | Vendedor |\n",
                );
                output.push_str("|---|---|---|---|---|---|---|---|\n");
                for row in rows {
                    output.push_str(&format!(
                        "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                        format_date_br(row.date),
                        row.medicine,
                        row.category,
                        row.quantity,
                        format_currency_brl(row.unit_price),
                        format_currency_brl(row.line_total),
                        row.city,
                        row.seller
                    ));
                }
            }
            TableView::Summaries(summaries) => {
                output.push_str(
                    "| Período | Qtd | Receita | Medicamentos | Categorias | Cidades | Vendedores |\n",
                );
                output.push_str("|---|---|---|---|---|---|---|\n");
                for summary in summaries {
                    output.push_str(&format!(
                        "| {} | {} | {} | {} | {} | {} | {} |\n",
                        summary.label,
                        summary.total_quantity,
                        format_currency_brl(summary.total_revenue),
                        summary.medicines.join(", "),
                        summary.categories.join(", "),
                        summary.cities.join(", "),
                        summary.sellers.join(", ")
                    ));
                }
            }
        }
        output.push('\n');

        output.push_str("## Projeção\n\n");
        output.push_str(&format!("_{}_\n\n", self.view.projection.label));
        output.push_str("| Período | Valor |\n");
        output.push_str("|---|---|\n");
        for point in &self.view.projection.points {
            let value = match self.view.projection.metric {
                ProjectionMetric::Revenue => format_currency_brl(point.value),
                ProjectionMetric::Units => format!("{:.0}", point.value),
            };
            output.push_str(&format!("| {} | {} |\n", format_date_br(point.period), value));
        }
        output.push('\n');

        output
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        let stats = &self.view.stats;

        output.push_str("Indicador,Valor\n");
        output.push_str(&format!("Total de vendas,{}\n", stats.total_sales));
        output.push_str(&format!("Unidades vendidas,{}\n", stats.total_units));
        output.push_str(&format!("Receita total,{:.2}\n", stats.total_revenue));
        output.push_str(&format!("Ticket médio,{:.2}\n", stats.average_ticket));
        output.push_str(&format!(
            "Produto mais vendido,{}\n",
            stats.top_product.as_deref().unwrap_or("N/A")
        ));
        output.push('\n');

        output.push_str("Período,Receita,Unidades\n");
        for point in &self.view.series {
            output.push_str(&format!(
                "{},{:.2},{}\n",
                point.chart_key(self.view.granularity),
                point.revenue,
                point.units
            ));
        }
        output.push('\n');

        match &self.view.table {
            TableView::Records(rows) => {
                output.push_str(
                    "Data,Medicamento,Categoria,Quantidade,Preço Unitário,Preço Total,Cidade,Vendedor\n",
                );
                for row in rows {
                    output.push_str(&format!(
                        "{},{},{},{},{:.2},{:.2},{},{}\n",
                        row.date.format("%Y-%m-%d"),
                        row.medicine,
                        row.category,
                        row.quantity,
                        row.unit_price,
                        row.line_total,
                        row.city,
                        row.seller
                    ));
                }
            }
            TableView::Summaries(summaries) => {
                output.push_str(
                    "Período,Quantidade,Receita,Medicamentos,Categorias,Cidades,Vendedores\n",
                );
                for summary in summaries {
                    output.push_str(&format!(
                        "{},{},{:.2},{},{},{},{}\n",
                        summary.label,
                        summary.total_quantity,
                        summary.total_revenue,
                        summary.medicines.join("; "),
                        summary.categories.join("; "),
                        summary.cities.join("; "),
                        summary.sellers.join("; ")
                    ));
                }
            }
        }

        output
    }
}
