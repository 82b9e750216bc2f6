use anyhow::Result;
use comfy_table::Table;

use fleximart_ingest::SourceFiles;
use fleximart_load::SCHEMA_TABLES;

use fleximart_cli::pipeline::run;
use fleximart_cli::types::{RunOptions, RunResult};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

const DEFAULT_DATABASE_FILE: &str = "fleximart.db";
const DEFAULT_REPORT_FILE: &str = "data_quality_report.txt";

pub fn run_schema() {
    for table_schema in SCHEMA_TABLES {
        let mut table = Table::new();
        table.set_header(vec!["Column", "Type", "Constraints"]);
        apply_table_style(&mut table);
        for column in table_schema.columns {
            let reference = table_schema
                .foreign_keys
                .iter()
                .find(|fk| fk.column == column.name)
                .map(|fk| format!("REFERENCES {}({})", fk.table, fk.references));
            let constraints = [Some(column.constraints.to_string()), reference]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            table.add_row(vec![column.name, column.sql_type, constraints.as_str()]);
        }
        println!("{}", table_schema.name);
        println!("{table}");
    }
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    run(&run_options(args))
}

fn run_options(args: &RunArgs) -> RunOptions {
    let input_dir = args.input_dir.clone();
    RunOptions {
        files: SourceFiles {
            customers: args.customers_file.clone(),
            products: args.products_file.clone(),
            sales: args.sales_file.clone(),
        },
        database: args
            .database
            .clone()
            .unwrap_or_else(|| input_dir.join(DEFAULT_DATABASE_FILE)),
        report: args
            .report
            .clone()
            .unwrap_or_else(|| input_dir.join(DEFAULT_REPORT_FILE)),
        dry_run: args.dry_run,
        input_dir,
    }
}
