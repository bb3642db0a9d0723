use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use consult_lib::{
    draft::FileDraftStore,
    media::UploadProgress,
    submit::{FormStep, PaymentServices, PaymentStep},
    Error, Settings,
};
use consult_proto::{
    DEFAULT_CLOUD_NAME, DEFAULT_MEDIA_BASE, DEFAULT_PAYMENT_DELAY_MS, DEFAULT_TABLE,
    DEFAULT_UPLOAD_PRESET,
};
use simple_logger::SimpleLogger;
use url::Url;

use crate::ui::{FileProgressBar, InteractiveUI, PromptUI};

mod ui;

#[derive(Parser)]
struct Args {
    /// Directory holding the pending form data between the two steps
    #[arg(long, env = "CONSULT_DRAFT_DIR", default_value = ".")]
    draft_dir: PathBuf,

    /// Base URL of the media upload service
    #[arg(long, env = "CONSULT_MEDIA_BASE", default_value = DEFAULT_MEDIA_BASE)]
    media_base: String,

    /// Cloud name on the media upload service
    #[arg(long, env = "CONSULT_CLOUD_NAME", default_value = DEFAULT_CLOUD_NAME)]
    cloud_name: String,

    /// Unsigned upload preset used for palm images
    #[arg(long, env = "CONSULT_UPLOAD_PRESET", default_value = DEFAULT_UPLOAD_PRESET)]
    upload_preset: String,

    /// Do not use nerd fonts
    #[arg(long)]
    no_nerd: bool,

    #[clap(subcommand)]
    cmd: SubCommand,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            media_base: self.media_base.clone(),
            cloud_name: self.cloud_name.clone(),
            upload_preset: self.upload_preset.clone(),
            draft_dir: self.draft_dir.clone(),
            ..Default::default()
        }
    }
}

#[derive(clap::Subcommand)]
enum SubCommand {
    /// Fill in the consultation form and stage it for payment
    Form(FormArgs),
    /// Pay for the staged consultation and submit it
    Pay(PayArgs),
    /// Open the landing page, showing the payment notice if present
    Landing(LandingArgs),
}

#[derive(Parser, Default)]
pub struct FormArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Date of birth
    #[arg(long)]
    pub dob: Option<String>,
    /// Time of birth
    #[arg(long, conflicts_with = "time_unknown")]
    pub tob: Option<String>,
    /// Time of birth is unknown
    #[arg(long)]
    pub time_unknown: bool,
    /// Place of birth
    #[arg(long)]
    pub pob: Option<String>,
    #[arg(long)]
    pub service: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    /// Image of the left palm
    #[arg(long)]
    pub left_palm: Option<PathBuf>,
    /// Image of the right palm
    #[arg(long)]
    pub right_palm: Option<PathBuf>,
}

#[derive(Parser)]
struct PayArgs {
    /// URL of the hosted record store
    #[arg(long, env = "CONSULT_STORE_URL")]
    store_url: String,

    /// API key of the hosted record store
    #[arg(long, env = "CONSULT_STORE_KEY", hide_env_values = true)]
    store_key: String,

    /// Table receiving submissions
    #[arg(long, env = "CONSULT_TABLE", default_value = DEFAULT_TABLE)]
    table: String,

    /// Simulated payment processing time in milliseconds
    #[arg(long, env = "CONSULT_PAYMENT_DELAY_MS", default_value_t = DEFAULT_PAYMENT_DELAY_MS)]
    payment_delay_ms: u64,

    /// Pay without asking for confirmation
    #[arg(long, short)]
    yes: bool,
}

#[derive(Parser)]
struct LandingArgs {
    /// Landing page URL, e.g. https://example.com/index.html?payment=success
    url: Url,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .expect("Failed to init logger");

    let args: Args = Args::parse();
    let mut settings = args.settings();
    let mut ui = PromptUI::default();
    ui.use_nerd_fonts = !args.no_nerd;

    match args.cmd {
        SubCommand::Form(form_args) => run_form(&settings, form_args, &mut ui).await,
        SubCommand::Pay(pay_args) => {
            settings.store_url = pay_args.store_url;
            settings.store_key = pay_args.store_key;
            settings.table = pay_args.table;
            settings.payment_delay = Duration::from_millis(pay_args.payment_delay_ms);
            run_pay(&settings, pay_args.yes, &mut ui).await
        }
        SubCommand::Landing(landing_args) => {
            ui.open_landing(&landing_args.url);
            Ok(())
        }
    }
}

async fn run_form(settings: &Settings, args: FormArgs, ui: &mut PromptUI) -> anyhow::Result<()> {
    let store = Arc::new(FileDraftStore::new(&settings.draft_dir));
    log::debug!("draft slot: {:?}", store.path());
    let mut step = FormStep::new(store);
    let mut form = ui.fill_form(args).await;

    loop {
        match step.submit(&mut form, ui).await {
            Ok(page) => {
                ui.navigate(&page);
                return Ok(());
            }
            Err(Error::Validation(e)) => {
                println!();
                if !ui.ask_retry("Do you want to correct the form?") {
                    return Ok(());
                }
                ui.fix_form(&mut form, &e).await;
            }
            Err(e) => {
                ui.print_error(&e);
                return Err(e.into());
            }
        }
    }
}

async fn run_pay(settings: &Settings, yes: bool, ui: &mut PromptUI) -> anyhow::Result<()> {
    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<UploadProgress>(100);
    let services = PaymentServices::from_settings(settings, Some(progress_tx))?;
    let mut step = PaymentStep::open(services, ui).await;

    match step.draft() {
        Some(draft) if yes || ui.confirm_payment(draft) => {}
        _ => return Ok(()),
    }

    let mut pb = FileProgressBar::new(ui.use_nerd_fonts);
    tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            pb.update(progress);
        }
    });

    loop {
        match step.finalize(ui).await {
            Ok(page) => {
                ui.navigate(&page);
                return Ok(());
            }
            Err(e) if e.requires_restart() => return Err(e.into()),
            Err(_) => {
                println!();
                if !ui.ask_retry("Do you want to retry the payment step?") {
                    return Ok(());
                }
            }
        }
    }
}
