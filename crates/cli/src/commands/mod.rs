//! Subcommand handlers

pub mod account;
pub mod banking;
pub mod staff;
pub mod status;
pub mod users;

use madina_core::PersonalInfo;

use crate::HolderArgs;

impl HolderArgs {
    pub fn to_personal_info(&self) -> PersonalInfo {
        PersonalInfo::new(&self.name, &self.dob, &self.cnic, &self.address)
    }
}
