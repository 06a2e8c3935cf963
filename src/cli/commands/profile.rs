use anyhow::Result;
use common::format_currency;
use compute::{load_counselor, save_profile, ProfileForm};
use model::TableStore;
use tracing::info;

use crate::cli::ProfileCommand;

pub async fn run(store: &dyn TableStore, user_id: &str, command: ProfileCommand) -> Result<String> {
    let counselor = load_counselor(store, user_id).await?;
    let mut form = ProfileForm::from_counselor(&counselor);

    match command {
        ProfileCommand::Show => return Ok(render(&form)),
        ProfileCommand::AddSpecialty { tag } => {
            if !form.specialties.add(&tag) {
                return Ok(format!("Specialty '{}' is already listed", tag.trim()));
            }
        }
        ProfileCommand::RemoveSpecialty { tag } => {
            if !form.specialties.remove(&tag) {
                return Ok(format!("Specialty '{}' is not listed", tag));
            }
        }
        ProfileCommand::SetRate { rate } => form.hourly_rate = rate,
    }

    let saved = save_profile(store, &counselor.id, &form).await?;
    info!("Profile of counselor {} updated", saved.id);
    Ok(format!("Profile saved\n{}", render(&ProfileForm::from_counselor(&saved))))
}

pub fn render(form: &ProfileForm) -> String {
    let specialties = if form.specialties.is_empty() {
        "-".to_string()
    } else {
        form.specialties.iter().collect::<Vec<_>>().join(", ")
    };
    format!(
        "Bio:         {}\nSpecialties: {}\nHourly rate: {}\nProfile URL: {}\nImage:       {}",
        form.bio,
        specialties,
        format_currency(form.hourly_rate),
        form.profile_url,
        form.profile_image
    )
}
