//! Subcommand bodies. Each one reads or writes through the file store.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use medsynth_cohort::{CohortGenerator, CohortPlan};
use medsynth_core::rng::{entropy_seed, seeded};
use medsynth_core::{MedsynthConfig, Profession, Topic, VitalChannel, VitalSample, VitalStatus};
use medsynth_narrative::CommentDraft;
use medsynth_store::fallback::{ensure_patients, vitals_or_generate};
use medsynth_store::persist::persist_cohort;
use medsynth_store::{JsonFileStore, PatientStore};
use medsynth_vitals::{LiveFeed, LiveFeedConfig, LiveWindow};
use tracing::info;

pub async fn generate(config: &MedsynthConfig, store: &JsonFileStore, now: NaiveDateTime) -> Result<()> {
    let plan = CohortPlan::from_config(&config.generation);
    let cohort = CohortGenerator::new(plan, now).generate().await?;
    let manifest = persist_cohort(store, &cohort)
        .await
        .with_context(|| format!("Failed to write cohort to {}", store.layout().root().display()))?;

    println!(
        "Generated {} patients ({} detailed) into {}",
        manifest.patient_count,
        manifest.detailed_patients.len(),
        store.layout().root().display()
    );
    println!("Run {} (seed {})", manifest.run_id, manifest.seed);
    Ok(())
}

pub async fn live(config: &MedsynthConfig, patient_id: &str) -> Result<()> {
    let feed_config = LiveFeedConfig::from(&config.live);
    let mut window = LiveWindow::new(feed_config.window);
    let seed = config.generation.seed.unwrap_or_else(entropy_seed);

    let (feed, mut rx) = LiveFeed::new(patient_id, feed_config);
    let handle = feed.spawn(seed);
    println!("Live vitals for {} (Ctrl-C to stop)", patient_id);

    loop {
        tokio::select! {
            reading = rx.recv() => match reading {
                Some(sample) => {
                    println!("{}", reading_line(&sample));
                    window.push(sample);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping live feed");
                handle.stop();
            }
        }
    }

    let sent = handle.join().await;
    println!("{} readings; last {} averaged:", sent, window.len());
    for channel in VitalChannel::ALL {
        if let Some(mean) = window.mean(channel) {
            println!(
                "  {:<26} {:>7.1} {:<12} {}",
                channel.to_string(),
                mean,
                channel.unit(),
                channel.status(mean)
            );
        }
    }
    Ok(())
}

fn reading_line(s: &VitalSample) -> String {
    let mut line = format!(
        "{}  HR {:>3}  BP {:>3}/{:<3}  T {:>4.1}  RR {:>2}  SpO2 {:>3}  Glu {:>3}",
        s.timestamp.format("%H:%M:%S"),
        s.heart_rate,
        s.blood_pressure_systolic,
        s.blood_pressure_diastolic,
        s.temperature,
        s.respiratory_rate,
        s.oxygen_saturation,
        s.glucose
    );
    let alarms = alarm_flags(s);
    if !alarms.is_empty() {
        line.push_str("  ");
        line.push_str(&alarms.join(" "));
    }
    line
}

/// `HR:warning`-style flags for every gauge that is not normal. Pressure is
/// one gauge covering both channels.
fn alarm_flags(s: &VitalSample) -> Vec<String> {
    let gauges = [
        ("HR", s.status(VitalChannel::HeartRate)),
        ("BP", s.blood_pressure_status()),
        ("T", s.status(VitalChannel::Temperature)),
        ("RR", s.status(VitalChannel::RespiratoryRate)),
        ("SpO2", s.status(VitalChannel::OxygenSaturation)),
        ("Glu", s.status(VitalChannel::Glucose)),
    ];
    gauges
        .into_iter()
        .filter(|(_, status)| *status != VitalStatus::Normal)
        .map(|(name, status)| format!("{}:{}", name, status))
        .collect()
}

pub async fn add_comment(
    store: &JsonFileStore,
    patient_id: &str,
    author: String,
    profession: Profession,
    topic: Topic,
    text: String,
    now: NaiveDateTime,
) -> Result<()> {
    let draft = CommentDraft {
        author,
        profession,
        topic,
        text,
    };
    let comment = store
        .add_comment(patient_id, draft, now)
        .await
        .with_context(|| format!("Failed to add comment for {}", patient_id))?;
    println!("Added {} for {}", comment.id, patient_id);
    Ok(())
}

pub async fn list_comments(store: &JsonFileStore, patient_id: &str) -> Result<()> {
    let comments = store.load_comments(patient_id).await?;
    if comments.is_empty() {
        println!("No comments for {}", patient_id);
    }
    for c in comments {
        println!(
            "{} {} {} ({}) [{}]\n    {}",
            c.id,
            c.timestamp.format("%Y-%m-%d %H:%M"),
            c.author,
            c.profession,
            c.topic,
            c.text
        );
    }
    Ok(())
}

pub async fn timeline(store: &JsonFileStore, patient_id: &str, conditions: &[String], json: bool) -> Result<()> {
    let mut projection = store
        .load_projection(patient_id)
        .await
        .with_context(|| format!("No timeline for {}; run `medsynth generate` first", patient_id))?;
    if !conditions.is_empty() {
        projection = projection.filter_conditions(conditions);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }
    if projection.is_empty() {
        println!("No timeline events for {}", patient_id);
    }
    for item in &projection.items {
        let severity = item.class_name.trim_start_matches("severity-");
        println!("{}  {:<45} {}", item.start, item.content, severity);
    }
    Ok(())
}

pub async fn ensure(config: &MedsynthConfig, store: &JsonFileStore, now: NaiveDateTime) -> Result<()> {
    let mut rng = seeded(config.generation.seed.unwrap_or_else(entropy_seed));
    let patients = ensure_patients(store, &mut rng, now)
        .await
        .context("Failed to load or seed patients")?;
    for p in &patients {
        let vitals = vitals_or_generate(store, &mut rng, &p.id, now, config.generation.vitals_days).await?;
        println!("{} {}: {} vital readings", p.id, p.full_name, vitals.len());
    }
    Ok(())
}
