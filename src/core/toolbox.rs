//! Tool panel section filters shipped alongside the bootstrap tool.
//!
//! A filter decides, per user, whether a tool panel section is shown.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct PanelUser {
    pub roles: Vec<String>,
}

impl PanelUser {
    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

pub trait SectionFilter {
    fn show(&self, user: &PanelUser, section: &str) -> bool;
}

/// 指定的 section 只有擁有允許角色的使用者看得到，其他 section 一律顯示
#[derive(Debug, Clone)]
pub struct RoleGatedSections {
    hidden_sections: HashSet<String>,
    allowed_roles: HashSet<String>,
}

impl RoleGatedSections {
    pub fn new(hidden_sections: &[&str], allowed_roles: &[&str]) -> Self {
        Self {
            hidden_sections: hidden_sections.iter().map(|s| s.to_string()).collect(),
            allowed_roles: allowed_roles.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn developmental() -> Self {
        Self::new(&["Developmental Tools"], &["Developer", "Tester"])
    }
}

impl SectionFilter for RoleGatedSections {
    fn show(&self, user: &PanelUser, section: &str) -> bool {
        if !self.hidden_sections.contains(section) {
            return true;
        }
        user.roles.iter().any(|role| self.allowed_roles.contains(role))
    }
}

/// 只顯示列出的 section
#[derive(Debug, Clone)]
pub struct OnlySections {
    sections: HashSet<String>,
}

impl OnlySections {
    pub fn new(sections: &[&str]) -> Self {
        Self {
            sections: sections.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn metagenomics() -> Self {
        Self::new(&["Metagenomic analyses", "Metagenomics: Mothur"])
    }
}

impl SectionFilter for OnlySections {
    fn show(&self, _user: &PanelUser, section: &str) -> bool {
        self.sections.contains(section)
    }
}
