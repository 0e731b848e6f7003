//! `salesdesk seller` — seller records.

use std::{cell::Cell, rc::Rc, sync::Arc};

use chrono::Local;
use tracing::{debug, info, instrument, warn};

use salesdesk_core::{
    application::SellerService,
    domain::Seller,
    forms::{
        DataChangeListener, SaveOutcome, SellerForm, SellerFormController,
        seller::{EMAIL_MAX_LENGTH, NAME_MAX_LENGTH},
        utils::{format_decimal, to_local_date},
    },
};

use crate::{
    cli::{GlobalArgs, SellerCommands, SellerFields, SellerListArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    storage::Services,
    terminal::{Prompter, TerminalWindow, report_labels},
};

use super::{ListFormat, csv_field, list_format, to_json};

/// Dispatch to the correct seller subcommand.
pub fn execute(
    cmd: SellerCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let services = Services::open(&config)?;
    let prompter = Prompter::new(&global);
    let date_format = config.forms.date_format.as_str();

    match cmd {
        SellerCommands::Add(fields) => edit(
            Seller::default(),
            fields,
            &services,
            date_format,
            prompter,
            &output,
        ),
        SellerCommands::Edit { id, fields } => {
            let seller = services
                .sellers
                .find_by_id(id)?
                .ok_or(CliError::RecordNotFound { entity: "Seller", id })?;
            edit(seller, fields, &services, date_format, prompter, &output)
        }
        SellerCommands::List(args) => list(&services, &args, date_format, &output),
        SellerCommands::Remove { id } => {
            services.sellers.remove(id)?;
            output.success(&format!("Seller {id} removed"))?;
            Ok(())
        }
    }
}

/// Run the seller form over `seller` until it is saved.
#[instrument(skip_all, fields(id = ?seller.id))]
fn edit(
    seller: Seller,
    fields: SellerFields,
    services: &Services,
    date_format: &str,
    prompter: Prompter,
    output: &OutputManager,
) -> CliResult<()> {
    let mut controller = SellerFormController::new(SellerForm::with_date_format(date_format));
    controller.set_seller_services(
        Arc::clone(&services.sellers),
        Arc::clone(&services.departments),
    );
    let on_file = Rc::new(Cell::new(None));
    controller.subscribe_data_change_listener(refresh_listener(
        Arc::clone(&services.sellers),
        Rc::clone(&on_file),
    ));
    controller.load_associated_objects()?;
    controller.set_entity(seller);
    controller.update_form_data();

    apply_fields(controller.form_mut(), fields)?;

    loop {
        if prompter.is_enabled() {
            prompt_fields(controller.form_mut(), prompter, output)?;
        }

        let window = TerminalWindow::new(output);
        match controller.on_save_action(&window) {
            SaveOutcome::Saved(saved) => {
                debug!(closed = window.is_closed(), "Form finished");
                output.success(&format!(
                    "Seller {} saved: {}",
                    saved.id.unwrap_or_default(),
                    saved.name
                ))?;
                if let Some(count) = on_file.get() {
                    output.info(&format!("{count} seller(s) on file"))?;
                }
                return Ok(());
            }
            SaveOutcome::Invalid(_) => {
                let form = controller.form();
                let problems = report_labels(
                    output,
                    &[
                        ("name", &form.name_error),
                        ("email", &form.email_error),
                        ("birth date", &form.birth_date_error),
                        ("base salary", &form.base_salary_error),
                    ],
                )?;
                if !prompter.is_enabled() {
                    return Err(CliError::InvalidForm {
                        entity: "seller",
                        problems,
                    });
                }
            }
            SaveOutcome::Failed(source) => {
                return Err(CliError::SaveFailed {
                    entity: "seller",
                    source,
                });
            }
        }
    }
}

/// Copy flag values into the form, rejecting what the inputs refuse.
fn apply_fields(form: &mut SellerForm, fields: SellerFields) -> CliResult<()> {
    if let Some(name) = fields.name {
        if !form.name.set_text(name) {
            return Err(CliError::invalid_input(format!(
                "seller name is longer than {NAME_MAX_LENGTH} characters"
            )));
        }
    }

    if let Some(email) = fields.email {
        if !form.email.set_text(email) {
            return Err(CliError::invalid_input(format!(
                "e-mail is longer than {EMAIL_MAX_LENGTH} characters"
            )));
        }
    }

    if let Some(date) = fields.birth_date {
        form.birth_date
            .set_text(&date)
            .map_err(|e| CliError::InvalidInput {
                message: format!(
                    "birth date '{date}' does not match {}",
                    form.birth_date.format()
                ),
                source: Some(Box::new(e)),
            })?;
    }

    if let Some(salary) = fields.base_salary {
        if !form.base_salary.set_text(salary.as_str()) {
            return Err(CliError::invalid_input(format!(
                "base salary '{salary}' is not a number"
            )));
        }
    }

    if let Some(id) = fields.department {
        select_department(form, id)?;
    }

    Ok(())
}

fn select_department(form: &mut SellerForm, id: i32) -> CliResult<()> {
    let index = form
        .department
        .items()
        .iter()
        .position(|d| d.id == Some(id))
        .ok_or(CliError::RecordNotFound {
            entity: "Department",
            id,
        })?;
    form.department.select_index(index);
    Ok(())
}

fn prompt_fields(form: &mut SellerForm, prompter: Prompter, output: &OutputManager) -> CliResult<()> {
    prompter.edit_field(output, "Name", &mut form.name)?;
    prompter.edit_field(output, "E-mail", &mut form.email)?;

    let label = format!("Birth date ({})", form.birth_date.format());
    loop {
        let answer = prompter.text(&label, &form.birth_date.text())?;
        match form.birth_date.set_text(&answer) {
            Ok(()) => break,
            Err(e) => output.warning(&format!("Birth date: {e}"))?,
        }
    }

    prompter.edit_field(output, "Base salary", &mut form.base_salary)?;

    let combo = &form.department;
    let names: Vec<String> = combo.items().iter().map(|d| combo.cell_text(Some(d))).collect();
    let current = combo.value().and_then(|selected| {
        combo
            .items()
            .iter()
            .position(|d| d.id == selected.id)
    });
    if let Some(index) = prompter.choose("Department", &names, current)? {
        form.department.select_index(index);
    }
    Ok(())
}

/// Listener that re-reads the seller list after a save.
fn refresh_listener(
    service: Arc<SellerService>,
    on_file: Rc<Cell<Option<usize>>>,
) -> Rc<dyn DataChangeListener> {
    Rc::new(move || match service.find_all() {
        Ok(all) => {
            info!(count = all.len(), "Seller list refreshed");
            on_file.set(Some(all.len()));
        }
        Err(e) => warn!(error = %e, "Failed to refresh seller list"),
    })
}

/// One seller as displayed by `list`.
struct Row {
    id: i32,
    name: String,
    email: String,
    birth_date: String,
    base_salary: String,
    department: String,
}

impl Row {
    fn new(seller: &Seller, date_format: &str) -> Self {
        Self {
            id: seller.id.unwrap_or_default(),
            name: seller.name.clone(),
            email: seller.email.clone(),
            birth_date: seller
                .birth_date
                .map(|d| to_local_date(&d, &Local).format(date_format).to_string())
                .unwrap_or_default(),
            base_salary: seller.base_salary.map(format_decimal).unwrap_or_default(),
            department: seller
                .department
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_default(),
        }
    }
}

fn list(
    services: &Services,
    args: &SellerListArgs,
    date_format: &str,
    output: &OutputManager,
) -> CliResult<()> {
    let sellers = match args.department {
        Some(id) => services.sellers.find_by_department(id)?,
        None => services.sellers.find_all()?,
    };

    match list_format(&args.list, output) {
        ListFormat::Table => {
            output.header("Sellers:")?;
            if sellers.is_empty() {
                output.print("  (none)")?;
            }
            for row in sellers.iter().map(|s| Row::new(s, date_format)) {
                output.data(&format!(
                    "  {:>4}  {:<24} {:<30} {:<10} {:>10}  {}",
                    row.id, row.name, row.email, row.birth_date, row.base_salary, row.department
                ))?;
            }
        }
        ListFormat::Json => output.data(&to_json(&sellers)?)?,
        ListFormat::Csv => {
            output.data("id,name,email,birth_date,base_salary,department")?;
            for row in sellers.iter().map(|s| Row::new(s, date_format)) {
                output.data(&format!(
                    "{},{},{},{},{},{}",
                    row.id,
                    csv_field(&row.name),
                    csv_field(&row.email),
                    row.birth_date,
                    row.base_salary,
                    csv_field(&row.department)
                ))?;
            }
        }
    }

    Ok(())
}
