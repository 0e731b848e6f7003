//! `salesdesk department` — department records.

use std::{cell::Cell, rc::Rc, sync::Arc};

use tracing::{debug, info, instrument, warn};

use salesdesk_core::{
    application::DepartmentService,
    domain::Department,
    forms::{
        DataChangeListener, DepartmentForm, DepartmentFormController, SaveOutcome,
        department::NAME_MAX_LENGTH,
    },
};

use crate::{
    cli::{DepartmentCommands, DepartmentFields, GlobalArgs, ListArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    storage::Services,
    terminal::{Prompter, TerminalWindow, report_labels},
};

use super::{ListFormat, csv_field, list_format, to_json};

/// Dispatch to the correct department subcommand.
pub fn execute(
    cmd: DepartmentCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let services = Services::open(&config)?;
    let prompter = Prompter::new(&global);

    match cmd {
        DepartmentCommands::Add(fields) => {
            edit(Department::default(), fields, &services, prompter, &output)
        }
        DepartmentCommands::Edit { id, fields } => {
            let department = services
                .departments
                .find_by_id(id)?
                .ok_or(CliError::RecordNotFound {
                    entity: "Department",
                    id,
                })?;
            edit(department, fields, &services, prompter, &output)
        }
        DepartmentCommands::List(args) => list(&services, &args, &output),
        DepartmentCommands::Remove { id } => {
            services.departments.remove(id)?;
            output.success(&format!("Department {id} removed"))?;
            Ok(())
        }
    }
}

/// Run the department form over `department` until it is saved.
#[instrument(skip_all, fields(id = ?department.id))]
fn edit(
    department: Department,
    fields: DepartmentFields,
    services: &Services,
    prompter: Prompter,
    output: &OutputManager,
) -> CliResult<()> {
    let mut controller = DepartmentFormController::new(DepartmentForm::new());
    controller.set_department_service(Arc::clone(&services.departments));
    let on_file = Rc::new(Cell::new(None));
    controller.subscribe_data_change_listener(refresh_listener(
        Arc::clone(&services.departments),
        Rc::clone(&on_file),
    ));
    controller.set_entity(department);
    controller.update_form_data();

    if let Some(name) = fields.name {
        if !controller.form_mut().name.set_text(name) {
            return Err(CliError::invalid_input(format!(
                "department name is longer than {NAME_MAX_LENGTH} characters"
            )));
        }
    }

    loop {
        if prompter.is_enabled() {
            prompter.edit_field(output, "Name", &mut controller.form_mut().name)?;
        }

        let window = TerminalWindow::new(output);
        match controller.on_save_action(&window) {
            SaveOutcome::Saved(saved) => {
                debug!(closed = window.is_closed(), "Form finished");
                output.success(&format!(
                    "Department {} saved: {}",
                    saved.id.unwrap_or_default(),
                    saved.name
                ))?;
                if let Some(count) = on_file.get() {
                    output.info(&format!("{count} department(s) on file"))?;
                }
                return Ok(());
            }
            SaveOutcome::Invalid(_) => {
                let form = controller.form();
                let problems = report_labels(output, &[("name", &form.name_error)])?;
                if !prompter.is_enabled() {
                    return Err(CliError::InvalidForm {
                        entity: "department",
                        problems,
                    });
                }
            }
            SaveOutcome::Failed(source) => {
                return Err(CliError::SaveFailed {
                    entity: "department",
                    source,
                });
            }
        }
    }
}

/// Listener that re-reads the department list after a save, the way a list
/// view refreshes itself.
fn refresh_listener(
    service: Arc<DepartmentService>,
    on_file: Rc<Cell<Option<usize>>>,
) -> Rc<dyn DataChangeListener> {
    Rc::new(move || match service.find_all() {
        Ok(all) => {
            info!(count = all.len(), "Department list refreshed");
            on_file.set(Some(all.len()));
        }
        Err(e) => warn!(error = %e, "Failed to refresh department list"),
    })
}

fn list(services: &Services, args: &ListArgs, output: &OutputManager) -> CliResult<()> {
    let departments = services.departments.find_all()?;

    match list_format(args, output) {
        ListFormat::Table => {
            output.header("Departments:")?;
            if departments.is_empty() {
                output.print("  (none)")?;
            }
            for department in &departments {
                output.data(&format!(
                    "  {:>4}  {}",
                    department.id.unwrap_or_default(),
                    department.name
                ))?;
            }
        }
        ListFormat::Json => output.data(&to_json(&departments)?)?,
        ListFormat::Csv => {
            output.data("id,name")?;
            for department in &departments {
                output.data(&format!(
                    "{},{}",
                    department.id.unwrap_or_default(),
                    csv_field(&department.name)
                ))?;
            }
        }
    }

    Ok(())
}
