use anyhow::{Result, bail};
use okta_browser::{Directory, DirectoryError, EntryId};

pub async fn run(directory: &dyn Directory, login: &str) -> Result<()> {
    match directory.get_profile(&EntryId::new(login)).await {
        Ok(record) => {
            print!("{}", okta_browser_tui::format_profile_body(&record));
            Ok(())
        }
        Err(DirectoryError::NotFound(_)) => bail!("User not found: {login}"),
        Err(e) => Err(e.into()),
    }
}
