use anyhow::Result;
use pharmacy_sales_engine::{
    DashboardReport, Dimension, FilterSelection, Granularity, ProjectionMetric, SalesHistory,
};

const SAMPLE: &str = "Data,Medicamento,Categoria,Quantidade,Preço,Cidade,Vendedor\n\
    2024-01-01,Aspirina,Analgésico,2,R$ 10.00,SP,Ana\n\
    2024-01-03,Dipirona,Analgésico,3,R$ 5.00,SP,Bruno\n\
    2024-01-08,Vitamina C,Vitamina,1,R$ 8.00,SP,Ana\n\
    2024-01-15,Amoxicilina,Antibiótico,2,R$ 25.00,RJ,Carla\n\
    2024-02-02,Protetor Solar,Dermatológico,1,R$ 30.00,BH,Ana\n\
    2024-02-10,Aspirina,Analgésico,2,R$ abc,SP,Bruno";

fn main() -> Result<()> {
    let history = SalesHistory::from_delimited(SAMPLE)?;
    for warning in history.warnings() {
        eprintln!("aviso: {}", warning);
    }

    let selection = FilterSelection::default().with(Dimension::City, "SP");
    let view = history.view(&selection, Granularity::Monthly, ProjectionMetric::Revenue);
    let report = DashboardReport::new(view);

    println!("{}", report.to_markdown());
    Ok(())
}
