use sales_insights::run_sales_analysis;

const SALES_SPREADSHEET: &str = "dados_vendas.xlsx";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run_sales_analysis(SALES_SPREADSHEET) {
        log::error!("Sales analysis failed: {}", error);
        std::process::exit(1);
    }
}
