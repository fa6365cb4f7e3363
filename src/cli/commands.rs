use crate::assembler::assemble;
use crate::config::PlanConfig;
use crate::error::PlanResult;
use crate::excel::ExcelExporter;
use crate::layout::SheetId;
use crate::parser;
use colored::Colorize;

/// Execute the full pipeline: load input, assemble, write the workbook
pub fn generate(config: &PlanConfig, verbose: bool) -> PlanResult<()> {
    println!("{}", "📊 Product Plan - Workbook Generator".bold().green());
    println!("   Input:  {}", config.input.display());
    println!("   Output: {}\n", config.output.display());

    if verbose {
        println!("{}", "📖 Reading mapping file...".cyan());
    }

    let document = parser::load_mapping(&config.input)?;

    if verbose {
        println!("   Found {} records\n", document.data.len());
        println!("{}", "🧮 Building sheets...".cyan());
    }

    let plan = assemble(&document, config)?;

    if verbose {
        for sheet in &plan.sheets {
            println!(
                "   {} ({} columns, {} rows)",
                sheet.name().bright_blue().bold(),
                sheet.schema.len(),
                sheet.rows.len()
            );
        }
        if let Some(custom) = plan.sheet(SheetId::CustomDevice) {
            println!(
                "   {} custom device labels",
                custom.schema.len().saturating_sub(1)
            );
        }
        println!();
        println!("{}", "💾 Writing workbook...".cyan());
    }

    ExcelExporter::new(&plan).export(&config.output)?;

    println!("{}", "✅ Done".bold().green());
    println!("   Excel file: {}\n", config.output.display());

    Ok(())
}
