use anyhow::Result;
use pharmacy_sales_engine::api::PredictionClient;

#[tokio::main]
async fn main() -> Result<()> {
    let client = PredictionClient::new();

    let stats = client.stats().await?;
    println!("Receita total:   {}", stats.total_revenue);
    println!("Total de vendas: {}", stats.total_sales);
    println!("Ticket médio:    {}", stats.average_ticket);
    println!("Produto top:     {}", stats.top_product);

    let prediction = client.predict(7).await?;
    println!(
        "\nModelo: {} (confiança {})",
        prediction.model, prediction.confidence
    );
    for point in &prediction.predictions {
        println!(
            "{}: {} vendas, {}",
            point.date, point.predicted_sales, point.predicted_revenue
        );
    }

    println!("\nProdutos mais vendidos:");
    for (rank, product) in client.top_products().await?.iter().enumerate() {
        println!("{}. {} ({} vendas)", rank + 1, product.product, product.sales);
    }

    Ok(())
}
