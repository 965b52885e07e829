use std::path::Path;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{CommandEntry, Scope};
use crate::cli::render;
use crate::validation::ImageUpload;
use crate::wizard::{PreviewOutcome, WorkEntryField};

use super::{joined, parse_index, usage};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add-skill",
            "Add a skill",
            "add-skill <skill>",
            Scope::Employee,
            cmd_add_skill,
        ),
        CommandEntry::new(
            "remove-skill",
            "Remove a skill",
            "remove-skill <skill>",
            Scope::Employee,
            cmd_remove_skill,
        ),
        CommandEntry::new(
            "add-work",
            "Add a blank work experience entry",
            "add-work",
            Scope::Employee,
            cmd_add_work,
        ),
        CommandEntry::new(
            "remove-work",
            "Remove a work experience entry",
            "remove-work <n>",
            Scope::Employee,
            cmd_remove_work,
        ),
        CommandEntry::new(
            "work",
            "Edit a work experience entry",
            "work <n> company|position|duration|description <value>",
            Scope::Employee,
            cmd_work,
        ),
        CommandEntry::new(
            "image",
            "Attach a profile image or company logo",
            "image <path>",
            Scope::Profile,
            cmd_image,
        ),
        CommandEntry::new(
            "remove-image",
            "Remove the attached image",
            "remove-image",
            Scope::Profile,
            cmd_remove_image,
        ),
        CommandEntry::new(
            "options",
            "List industries and company sizes",
            "options",
            Scope::Company,
            cmd_options,
        ),
    ]
}

fn cmd_add_skill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let skill = joined(args);
    if context.wizard.employee_mut()?.add_skill(&skill) {
        io::print_success(format!("Added skill `{}`.", skill.trim()));
    } else {
        io::print_warning("Skill is blank or already listed.");
    }
    Ok(())
}

fn cmd_remove_skill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage("remove-skill <skill>"));
    }
    let skill = joined(args);
    if context.wizard.employee_mut()?.remove_skill(&skill) {
        io::print_success(format!("Removed skill `{skill}`."));
    } else {
        io::print_warning(format!("Skill `{skill}` is not listed."));
    }
    Ok(())
}

fn cmd_add_work(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let index = context.wizard.employee_mut()?.add_work_entry();
    io::print_success(format!("Added work entry #{}.", index + 1));
    Ok(())
}

fn cmd_remove_work(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args.first().ok_or_else(|| usage("remove-work <n>"))?;
    let index = parse_index(raw)?;
    let screen = context.wizard.employee_mut()?;
    if screen.remove_work_entry(index) {
        io::print_success(format!("Removed work entry #{}.", index + 1));
    } else if screen.work_history().len() <= 1 {
        io::print_warning("At least one work experience entry is required.");
    } else {
        io::print_warning(format!("There is no work entry #{}.", index + 1));
    }
    Ok(())
}

fn cmd_work(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "work <n> company|position|duration|description <value>";
    let [raw_index, raw_field, rest @ ..] = args else {
        return Err(usage(USAGE));
    };
    let index = parse_index(raw_index)?;
    let field = WorkEntryField::parse(raw_field).ok_or_else(|| usage(USAGE))?;
    if context
        .wizard
        .employee_mut()?
        .update_work_entry(index, field, joined(rest))
    {
        io::print_success(format!("Updated work entry #{}.", index + 1));
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!(
            "there is no work entry #{}",
            index + 1
        )))
    }
}

fn cmd_image(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage("image <path>"));
    }
    let path = joined(args);
    let upload = ImageUpload::from_path(Path::new(&path))?;
    let file_name = upload.file_name.clone();
    let outcome = context
        .runtime
        .block_on(context.wizard.select_image(upload))?;
    match outcome {
        PreviewOutcome::Applied => io::print_success(format!("Attached `{file_name}`.")),
        PreviewOutcome::Rejected(error) => io::print_warning(error),
        PreviewOutcome::Stale => io::print_warning("The screen changed before the preview was ready."),
    }
    Ok(())
}

fn cmd_remove_image(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.wizard.remove_image()?;
    io::print_success("Image removed.");
    Ok(())
}

fn cmd_options(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render::company_options();
    Ok(())
}
