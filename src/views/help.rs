use super::{ContentRegion, Screen};

/// Static help text; no network call
pub fn screen() -> Screen {
    Screen::new("Help")
        .paragraph("Welcome to the Release Management Platform!")
        .list(vec![
            "Profile: Manage your personal information.".to_string(),
            "Releases: View and manage release stages.".to_string(),
            "Admin Panel: Available to administrators for user management.".to_string(),
        ])
}

pub fn show(region: &mut dyn ContentRegion) {
    region.replace(screen());
}
