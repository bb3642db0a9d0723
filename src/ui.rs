use std::{collections::HashMap, fmt::Write, path::PathBuf, time::Duration};

use async_trait::async_trait;
use colored::Colorize;
use comfy_table::Table;
use consult_lib::{
    media::{MediaFile, UploadProgress},
    submit::{
        consume_payment_notice, FormView, Page, SubmitControl, SUCCESS_MESSAGE, SUCCESS_TITLE,
    },
    validate::{
        live_email, live_name, Annotations, Check, ConsultationForm, Field, FileInput,
        ValidationError,
    },
    Error,
};
use consult_proto::dto::{DraftSubmission, MediaType, PortableBinary};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use inquire::{validator::Validation, CustomUserError};
use itertools::Itertools;
use url::Url;

use crate::FormArgs;

const PROGRESS_BAR_NO_NERD_TICK_CHARS: &'static str = "+x*";

pub struct FileProgressBar {
    style: ProgressStyle,
    pbs: HashMap<String, ProgressBar>,
}

impl FileProgressBar {
    pub fn new(use_nerd_fonts: bool) -> Self {
        let mut style = ProgressStyle::with_template("{spinner} [{elapsed_precise}] [{msg}] [{bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .with_key("eta", |state: &ProgressState, w: &mut dyn Write| write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap())
            .progress_chars("#>-");
        if !use_nerd_fonts {
            style = style.tick_chars(PROGRESS_BAR_NO_NERD_TICK_CHARS);
        }
        Self {
            style,
            pbs: HashMap::new(),
        }
    }

    pub fn update(&mut self, progress: UploadProgress) {
        if let Some(pb) = self.pbs.get(&progress.file_id) {
            pb.set_position(progress.position);
            if progress.finish {
                pb.finish();
            }
            return;
        }

        let pb = ProgressBar::new(progress.total)
            .with_style(self.style.clone())
            .with_message(progress.file_name.clone())
            .with_position(progress.position);

        if progress.finish {
            pb.finish();
        }
        self.pbs.insert(progress.file_id, pb);
    }
}

#[async_trait]
pub trait InteractiveUI {
    async fn fill_form(&self, args: FormArgs) -> ConsultationForm;

    async fn fix_form(&self, form: &mut ConsultationForm, error: &ValidationError);

    fn confirm_payment(&self, draft: &DraftSubmission) -> bool;

    fn navigate(&mut self, page: &Page);

    fn open_landing(&self, url: &Url);

    fn print_error(&self, error: &Error);

    fn ask_retry(&self, question: &str) -> bool;
}

pub struct PromptUI {
    pub use_nerd_fonts: bool,
    spinner: Option<ProgressBar>,
}

impl Default for PromptUI {
    fn default() -> Self {
        Self {
            use_nerd_fonts: true,
            spinner: None,
        }
    }
}

#[async_trait]
impl InteractiveUI for PromptUI {
    async fn fill_form(&self, args: FormArgs) -> ConsultationForm {
        let mut form = ConsultationForm {
            name: args.name.unwrap_or_else(|| self.prompt_text(Field::Name, true)),
            email: args.email.unwrap_or_else(|| self.prompt_text(Field::Email, true)),
            phone: args.phone.or_else(|| {
                Some(self.prompt_text(Field::Phone, false)).filter(|p| !p.is_empty())
            }),
            dob: args.dob.unwrap_or_else(|| self.prompt_text(Field::Dob, true)),
            ..Default::default()
        };

        match args.tob {
            Some(tob) => form.tob = tob,
            None if args.time_unknown => form.set_time_unknown(true),
            None => self.prompt_tob(&mut form),
        }

        form.pob = args.pob.unwrap_or_else(|| self.prompt_text(Field::Pob, true));
        form.service = args
            .service
            .unwrap_or_else(|| self.prompt_text(Field::Service, true));
        form.message = args
            .message
            .unwrap_or_else(|| self.prompt_text(Field::Message, false));
        form.left_palm = self.open_image(Field::LeftPalm, args.left_palm).await;
        form.right_palm = self.open_image(Field::RightPalm, args.right_palm).await;
        form
    }

    async fn fix_form(&self, form: &mut ConsultationForm, error: &ValidationError) {
        let fields = error
            .invalid
            .iter()
            .map(|e| e.field)
            .chain(error.missing.iter().copied())
            .unique()
            .collect_vec();
        for field in fields {
            match field {
                Field::Name => form.name = self.prompt_text(field, true),
                Field::Email => form.email = self.prompt_text(field, true),
                Field::Dob => form.dob = self.prompt_text(field, true),
                Field::Tob => self.prompt_tob(form),
                Field::Pob => form.pob = self.prompt_text(field, true),
                Field::Service => form.service = self.prompt_text(field, true),
                Field::LeftPalm => form.left_palm = self.open_image(field, None).await,
                Field::RightPalm => form.right_palm = self.open_image(field, None).await,
                Field::Phone | Field::Message => {}
            }
        }
    }

    fn confirm_payment(&self, draft: &DraftSubmission) -> bool {
        inquire::Confirm::new(&format!("Pay for \"{}\" now?", draft.service))
            .with_default(true)
            .with_help_message("enter to pay, other to exit")
            .prompt_skippable()
            .is_ok_and(|r| r == Some(true))
    }

    fn navigate(&mut self, page: &Page) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        println!("{} {}", "→".bold(), page.href().underline());
        if let Page::Landing {
            payment_success: true,
        } = page
        {
            self.print_modal();
        }
    }

    fn open_landing(&self, url: &Url) {
        let (success, url) = consume_payment_notice(url);
        if success {
            self.print_modal();
        }
        println!("{}", url.as_str().underline());
    }

    fn print_error(&self, error: &Error) {
        println!("{}", error.to_string().bold().red());
    }

    fn ask_retry(&self, question: &str) -> bool {
        inquire::Confirm::new(question)
            .with_default(true)
            .with_help_message("enter to continue, other to exit")
            .with_parser(&|s| Ok(s.is_empty() || s == "y" || s == "Y"))
            .prompt_skippable()
            .is_ok_and(|r| r == Some(true))
    }
}

impl FormView for PromptUI {
    fn render_annotations(&mut self, annotations: &Annotations) {
        for (field, message) in annotations.iter() {
            println!("{} {}", format!("{}:", field).bold(), message.red());
        }
    }

    fn update_submit(&mut self, control: &SubmitControl) {
        if control.enabled {
            if let Some(spinner) = self.spinner.take() {
                spinner.finish_and_clear();
            }
            return;
        }

        let use_nerd_fonts = self.use_nerd_fonts;
        let spinner = self.spinner.get_or_insert_with(|| {
            let mut style = ProgressStyle::default_spinner();
            if !use_nerd_fonts {
                style = style.tick_chars(PROGRESS_BAR_NO_NERD_TICK_CHARS);
            }
            let pb = ProgressBar::new_spinner().with_style(style);
            pb.enable_steady_tick(Duration::from_millis(64));
            pb
        });
        spinner.set_message(control.label.clone());
    }

    fn show_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        println!("{}", message.bold().red());
    }

    fn show_summary(&mut self, draft: &DraftSubmission) {
        let or_na = |value: &str| {
            if value.is_empty() {
                "N/A".to_string()
            } else {
                value.to_string()
            }
        };

        let mut table = Table::new();
        table.set_header(vec!["Order summary", ""]);
        table.add_row(vec!["Service".to_string(), or_na(&draft.service)]);
        table.add_row(vec!["Name".to_string(), or_na(&draft.name)]);
        table.add_row(vec!["Email".to_string(), or_na(&draft.email)]);
        table.add_row(vec![
            Field::LeftPalm.label().to_string(),
            self.encoded_size(&draft.left_image),
        ]);
        table.add_row(vec![
            Field::RightPalm.label().to_string(),
            self.encoded_size(&draft.right_image),
        ]);
        println!("{}", table);
    }
}

impl PromptUI {
    fn prompt_text(&self, field: Field, required: bool) -> String {
        let label = format!("{}:", field.label());
        let mut prompt = inquire::Text::new(&label);
        match field {
            Field::Name => prompt = prompt.with_validator(name_validator),
            Field::Email => prompt = prompt.with_validator(email_validator),
            Field::Dob => prompt = prompt.with_placeholder("YYYY-MM-DD"),
            Field::Tob => prompt = prompt.with_placeholder("HH:MM"),
            _ => {}
        }
        if !required {
            prompt = prompt.with_help_message("optional, enter to skip");
        }
        match prompt.prompt_skippable() {
            Ok(Some(value)) => value,
            _ => std::process::exit(0),
        }
    }

    fn prompt_tob(&self, form: &mut ConsultationForm) {
        let unknown = inquire::Confirm::new("Is your time of birth unknown?")
            .with_default(false)
            .prompt_skippable()
            .is_ok_and(|r| r == Some(true));
        form.set_time_unknown(unknown);
        if !unknown {
            form.tob = self.prompt_text(Field::Tob, true);
        }
    }

    async fn open_image(&self, field: Field, path: Option<PathBuf>) -> FileInput {
        let path = match path {
            Some(path) => path,
            None => PathBuf::from(self.prompt_text(field, true)),
        };
        match MediaFile::open(&path).await {
            Ok(file) => {
                println!(
                    "{} {} {}",
                    self.file_icon(file.media_type()),
                    file.name,
                    humansize::format_size(file.size(), humansize::DECIMAL)
                );
                FileInput::new(file)
            }
            Err(e) => {
                println!("{}", format!("{}: {}", path.display(), e).red());
                FileInput::default()
            }
        }
    }

    fn encoded_size(&self, binary: &PortableBinary) -> String {
        // base64 carries 3 bytes in every 4 characters
        let payload = binary.as_str().split(',').nth(1).unwrap_or_default();
        humansize::format_size(payload.len() as u64 * 3 / 4, humansize::DECIMAL)
    }

    fn file_icon(&self, media_type: MediaType) -> &'static str {
        if !self.use_nerd_fonts {
            return "";
        }
        match media_type {
            MediaType::Image => "󰈟",
            MediaType::Video => "󰈫",
            MediaType::Pdf => "󰈧",
            MediaType::Text => "󰈙",
            MediaType::Other => "󰈔",
        }
    }

    fn print_modal(&self) {
        println!("{}", SUCCESS_TITLE.bold().green());
        println!("{}", SUCCESS_MESSAGE);
    }
}

fn as_validation(check: Check) -> Validation {
    match check {
        Ok(()) => Validation::Valid,
        Err(e) => Validation::Invalid(e.message.into()),
    }
}

fn name_validator(input: &str) -> Result<Validation, CustomUserError> {
    Ok(as_validation(live_name(input)))
}

fn email_validator(input: &str) -> Result<Validation, CustomUserError> {
    Ok(as_validation(live_email(input)))
}

#[cfg(test)]
mod tests {
    use consult_lib::validate::validate_name;
    use inquire::validator::Validation;

    use super::as_validation;

    #[test]
    fn test_as_validation() {
        assert!(matches!(as_validation(validate_name("Jo")), Validation::Valid));
        assert!(matches!(
            as_validation(validate_name("J")),
            Validation::Invalid(_)
        ));
    }
}
