use colored::Colorize;
use sheetanim_spec::{GenerationReport, TransferReport, ValidationResult};

/// Prints validation errors and warnings in human form.
pub(crate) fn print_validation(result: &ValidationResult) {
    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }
}

/// Prints what a generation run created and skipped.
pub(crate) fn print_generation_report(report: &GenerationReport) {
    if !report.clips.is_empty() {
        println!("\n{}", "Clips:".cyan().bold());
        for clip in &report.clips {
            println!(
                "  {} {} {} ({} keyframe(s), {})",
                "+".green(),
                clip.name,
                clip.path.dimmed(),
                clip.keyframes,
                &clip.hash[..clip.hash.len().min(16)]
            );
        }
    }

    if !report.skipped.is_empty() {
        println!("\n{}", "Skipped:".yellow().bold());
        for skipped in &report.skipped {
            println!("  {} {}", "-".yellow(), skipped);
        }
    }

    if let Some(ref template) = report.template {
        println!("\n{}", "Template:".cyan().bold());
        print_transfer_counts(template);
    }

    println!();
    let summary = format!(
        "{} state(s) created, {} skipped",
        report.created,
        report.skipped.len()
    );
    if report.is_complete() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.yellow().bold());
    }
    if let Some(ref path) = report.controller_path {
        println!("{} {}", "Controller:".dimmed(), path);
    }
}

/// Prints transfer counts followed by any warnings.
pub(crate) fn print_transfer_report(report: &TransferReport) {
    print_transfer_counts(report);
    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }
}

fn print_transfer_counts(report: &TransferReport) {
    println!("  {} {}", "Parameters:".dimmed(), report.parameters_copied);
    println!("  {} {}", "Transitions:".dimmed(), report.transitions_copied);
    println!(
        "  {} {}",
        "Any-state transitions:".dimmed(),
        report.any_state_transitions_copied
    );
    if report.states_created > 0 {
        println!("  {} {}", "States created:".dimmed(), report.states_created);
    }
    if report.layers_created > 0 {
        println!("  {} {}", "Layers created:".dimmed(), report.layers_created);
    }
}
