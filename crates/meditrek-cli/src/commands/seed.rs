//! Sample data loader.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use meditrek_auth::PasswordHasher;
use meditrek_core::config::AppConfig;
use meditrek_core::error::AppError;
use meditrek_database::Datastore;
use meditrek_database::migration::truncate_all;
use meditrek_entity::alert::{AlertPriority, AlertType, NewAlert};
use meditrek_entity::diagnostic::{NewDiagnosticTest, TestStatus, UpdateDiagnosticTest};
use meditrek_entity::user::CreateUser;

use crate::output::{self, OutputFormat};

/// Password shared by every sample account.
const SAMPLE_PASSWORD: &str = "password123";

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

struct SampleUser {
    name: &'static str,
    email: &'static str,
    notification_threshold: i32,
    email_notifications: bool,
}

struct SampleTest {
    owner: usize,
    name: &'static str,
    result: &'static str,
    date: (i32, u32, u32),
    status: TestStatus,
    notes: &'static str,
}

struct SampleAlert {
    owner: usize,
    title: &'static str,
    message: &'static str,
    alert_type: AlertType,
    priority: AlertPriority,
    expires_in_days: Option<i64>,
}

const USERS: &[SampleUser] = &[
    SampleUser {
        name: "Sakhile Ndlazi",
        email: "sakhile@monkeyandriver.com",
        notification_threshold: 7,
        email_notifications: true,
    },
    SampleUser {
        name: "Zethe Ndlazi",
        email: "zethe@momentum.com",
        notification_threshold: 5,
        email_notifications: false,
    },
];

const TESTS: &[SampleTest] = &[
    SampleTest {
        owner: 0,
        name: "Blood Glucose Test",
        result: "Normal - 95 mg/dL",
        date: (2024, 1, 15),
        status: TestStatus::Completed,
        notes: "Fasting blood glucose test performed",
    },
    SampleTest {
        owner: 0,
        name: "Cholesterol Panel",
        result: "Elevated LDL - 160 mg/dL",
        date: (2024, 1, 20),
        status: TestStatus::Completed,
        notes: "Follow-up recommended in 3 months",
    },
    SampleTest {
        owner: 0,
        name: "Complete Blood Count",
        result: "Pending analysis",
        date: (2024, 1, 25),
        status: TestStatus::Pending,
        notes: "Routine CBC ordered",
    },
    SampleTest {
        owner: 1,
        name: "Thyroid Function Test",
        result: "Normal TSH - 2.1 uIU/mL",
        date: (2024, 2, 1),
        status: TestStatus::Completed,
        notes: "Annual thyroid screening",
    },
    SampleTest {
        owner: 1,
        name: "HbA1c Test",
        result: "Elevated - 7.2%",
        date: (2024, 2, 5),
        status: TestStatus::Completed,
        notes: "Diabetes monitoring test",
    },
];

const ALERTS: &[SampleAlert] = &[
    SampleAlert {
        owner: 0,
        title: "Elevated LDL cholesterol",
        message: "Your cholesterol panel shows LDL at 160 mg/dL. Book a follow-up within 3 months.",
        alert_type: AlertType::Warning,
        priority: AlertPriority::High,
        expires_in_days: None,
    },
    SampleAlert {
        owner: 0,
        title: "Results pending",
        message: "Your complete blood count is still being analysed.",
        alert_type: AlertType::Info,
        priority: AlertPriority::Low,
        expires_in_days: Some(7),
    },
    SampleAlert {
        owner: 1,
        title: "HbA1c above target",
        message: "Your HbA1c of 7.2% is above the recommended range. Discuss treatment with your doctor.",
        alert_type: AlertType::Error,
        priority: AlertPriority::Critical,
        expires_in_days: None,
    },
    SampleAlert {
        owner: 1,
        title: "Thyroid results normal",
        message: "Your annual thyroid screening came back normal.",
        alert_type: AlertType::Success,
        priority: AlertPriority::Medium,
        expires_in_days: Some(30),
    },
];

/// Summary row per seeded user.
#[derive(Debug, Serialize, Tabled)]
struct SeedRow {
    /// Email
    email: String,
    /// Name
    name: String,
    /// Tests
    tests: usize,
    /// Alerts
    alerts: usize,
}

/// Execute the seed command
pub async fn execute(
    args: &SeedArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let datastore = super::open_datastore(config).await?;

    if !args.force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("This will DELETE all users, diagnostic tests and alerts. Continue?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let pool = datastore
        .pool()
        .ok_or_else(|| AppError::internal("PostgreSQL pool missing"))?;
    truncate_all(pool.pool()).await?;
    output::print_success("Existing data cleared.");

    let rows = load(&datastore, Utc::now()).await?;
    output::print_list(&rows, format);

    println!();
    println!("Sample login credentials:");
    for user in USERS {
        output::print_kv(user.email, SAMPLE_PASSWORD);
    }

    datastore.close().await;
    Ok(())
}

/// Insert the sample records. Expiring alerts are relative to `now`.
async fn load(datastore: &Datastore, now: DateTime<Utc>) -> Result<Vec<SeedRow>, AppError> {
    let hash = PasswordHasher::new().hash_password(SAMPLE_PASSWORD)?;

    let mut rows = Vec::with_capacity(USERS.len());
    let mut ids = Vec::with_capacity(USERS.len());

    for sample in USERS {
        let mut create = CreateUser::new(sample.name, sample.email, hash.clone());
        create.notification_threshold = sample.notification_threshold;
        create.email_notifications = sample.email_notifications;

        let user = datastore.users.create(create).await?;
        ids.push(user.id);
        rows.push(SeedRow {
            email: user.email,
            name: user.name,
            tests: 0,
            alerts: 0,
        });
    }

    for sample in TESTS {
        let user_id = ids[sample.owner];
        let test = datastore
            .diagnostics
            .create(NewDiagnosticTest {
                user_id,
                name: sample.name.to_string(),
                result: sample.result.to_string(),
                date: date(sample.date)?,
                notes: Some(sample.notes.to_string()),
            })
            .await?;

        if sample.status != TestStatus::Pending {
            let update = UpdateDiagnosticTest {
                status: Some(sample.status),
                ..Default::default()
            };
            datastore.diagnostics.update(test.id, user_id, &update).await?;
        }
        rows[sample.owner].tests += 1;
    }

    for sample in ALERTS {
        datastore
            .alerts
            .create(NewAlert {
                user_id: ids[sample.owner],
                title: sample.title.to_string(),
                message: sample.message.to_string(),
                alert_type: sample.alert_type,
                priority: sample.priority,
                expires_at: sample.expires_in_days.map(|d| now + Duration::days(d)),
            })
            .await?;
        rows[sample.owner].alerts += 1;
    }

    Ok(rows)
}

fn date((year, month, day): (i32, u32, u32)) -> Result<DateTime<Utc>, AppError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::internal(format!("Invalid sample date {year}-{month}-{day}")))
}
