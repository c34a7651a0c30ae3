//! Headless view model for the contact list/form screens. One state enum
//! with a payload per state, transitions checked when they happen, and
//! client-side pagination over the last fetched list. The caller owns the
//! network calls; this module only decides what is legal to show next.

use thiserror::Error;

use crate::contacts::{Contact, NewContact};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Add { draft: NewContact },
    Edit { original: Contact, draft: NewContact },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("only valid from the list view")]
    NotInList,
    #[error("no form is open")]
    NotInForm,
    #[error("no delete is pending")]
    NoPendingDelete,
    #[error("name and email are required")]
    MissingRequiredFields,
}

/// Page sizes offered by the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Five,
    Ten,
    Twenty,
    All,
}

impl PageSize {
    pub const CHOICES: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::All,
    ];

    fn rows(self) -> Option<usize> {
        match self {
            Self::Five => Some(5),
            Self::Ten => Some(10),
            Self::Twenty => Some(20),
            Self::All => None,
        }
    }
}

pub struct ContactsView {
    contacts: Vec<Contact>,
    view: View,
    page: usize,
    page_size: PageSize,
    pending_delete: Option<i64>,
}

impl Default for ContactsView {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactsView {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            view: View::List,
            page: 1,
            page_size: PageSize::Five,
            pending_delete: None,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Fresh fetch landed: replace the list and reset to page 1.
    pub fn set_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page = 1;
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        match self.page_size.rows() {
            None => 1,
            Some(rows) => self.contacts.len().div_ceil(rows).max(1),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn current_page(&self) -> &[Contact] {
        match self.page_size.rows() {
            None => &self.contacts,
            Some(rows) => {
                let start = (self.page - 1) * rows;
                let end = (start + rows).min(self.contacts.len());
                if start >= self.contacts.len() {
                    &[]
                } else {
                    &self.contacts[start..end]
                }
            }
        }
    }

    pub fn begin_add(&mut self) -> Result<(), TransitionError> {
        if self.view != View::List {
            return Err(TransitionError::NotInList);
        }
        self.view = View::Add {
            draft: NewContact::default(),
        };
        Ok(())
    }

    pub fn begin_edit(&mut self, contact: Contact) -> Result<(), TransitionError> {
        if self.view != View::List {
            return Err(TransitionError::NotInList);
        }
        let draft = NewContact {
            id: Some(contact.id),
            lead_id: contact.lead_id.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone,
            role: contact.role.clone(),
            address_id: contact.address_id,
            contact_rewards_id: contact.contact_rewards_id,
            photo: contact.photo.clone(),
            notes: contact.notes.clone(),
        };
        self.view = View::Edit {
            original: contact,
            draft,
        };
        Ok(())
    }

    pub fn draft_mut(&mut self) -> Option<&mut NewContact> {
        match &mut self.view {
            View::Add { draft } | View::Edit { draft, .. } => Some(draft),
            View::List => None,
        }
    }

    /// The form-level requirement the server deliberately does not enforce.
    pub fn validate_draft(&self) -> Result<(), TransitionError> {
        let draft = match &self.view {
            View::Add { draft } | View::Edit { draft, .. } => draft,
            View::List => return Err(TransitionError::NotInForm),
        };
        let filled = |f: &Option<String>| f.as_deref().is_some_and(|v| !v.trim().is_empty());
        if filled(&draft.name) && filled(&draft.email) {
            Ok(())
        } else {
            Err(TransitionError::MissingRequiredFields)
        }
    }

    /// Save landed on the server; the caller passes the re-fetched list.
    pub fn save_succeeded(&mut self, refreshed: Vec<Contact>) -> Result<(), TransitionError> {
        if self.view == View::List {
            return Err(TransitionError::NotInForm);
        }
        self.view = View::List;
        self.set_contacts(refreshed);
        Ok(())
    }

    pub fn cancel_form(&mut self) -> Result<(), TransitionError> {
        if self.view == View::List {
            return Err(TransitionError::NotInForm);
        }
        self.view = View::List;
        Ok(())
    }

    /// First step of the delete confirmation; arms the modal.
    pub fn request_delete(&mut self, id: i64) -> Result<(), TransitionError> {
        if self.view != View::List {
            return Err(TransitionError::NotInList);
        }
        self.pending_delete = Some(id);
        Ok(())
    }

    /// Second step: yields the armed id for the caller to execute, then
    /// disarms. The caller re-fetches and calls [`set_contacts`].
    ///
    /// [`set_contacts`]: ContactsView::set_contacts
    pub fn confirm_delete(&mut self) -> Result<i64, TransitionError> {
        self.pending_delete
            .take()
            .ok_or(TransitionError::NoPendingDelete)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
