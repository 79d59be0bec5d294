use super::convert_batch;
use crate::cli::CheckArgs;
use crate::error::Result;
use chemiscope::core::models::property::Target;
use chemiscope::workflows::convert::Conversion;

pub fn run(args: CheckArgs) -> Result<()> {
    let conversion = convert_batch(&args.options)?;
    println!("{}", summarize(&conversion));
    Ok(())
}

fn summarize(conversion: &Conversion) -> String {
    let document = &conversion.document;
    let count_for = |target: Target| {
        document
            .properties
            .iter()
            .filter(|(_, property)| property.target == target)
            .count()
    };

    let mut lines = vec![
        format!("Dataset: {}", document.meta.name),
        format!(
            "Properties: {} ({} per-atom, {} per-structure)",
            document.properties.len(),
            count_for(Target::Atom),
            count_for(Target::Structure)
        ),
        format!("Environments: {}", document.environments.len()),
        format!("Warnings: {}", conversion.warnings.len()),
    ];
    lines.extend(
        conversion
            .warnings
            .iter()
            .map(|warning| format!("  - {}", warning)),
    );
    lines.join("\n")
}
