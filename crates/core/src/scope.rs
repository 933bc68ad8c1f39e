//! Resource scoping for the labels endpoints.
//!
//! Published projects are served from a parallel public namespace. The
//! namespace is part of every [`MediaScope`] value rather than state on a
//! client, so requests for projects of differing visibility can be in
//! flight at the same time without interfering.

use crate::error::CoreError;
use crate::types::DbId;

/// Path prefix for projects that have not been published.
pub const PRIVATE_PREFIX: &str = "/services/projects";

/// Path prefix for published projects.
pub const PUBLIC_PREFIX: &str = "/services/public/projects";

/// Which resource namespace a project lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    pub fn from_published(is_published: bool) -> Self {
        if is_published {
            Self::Public
        } else {
            Self::Private
        }
    }

    pub fn resource_prefix(&self) -> &'static str {
        match self {
            Self::Private => PRIVATE_PREFIX,
            Self::Public => PUBLIC_PREFIX,
        }
    }
}

/// One media item within one project, in a fixed namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaScope {
    pub project_id: DbId,
    pub media_id: DbId,
    pub visibility: Visibility,
}

impl MediaScope {
    /// Build a scope, rejecting non-positive ids.
    pub fn new(project_id: DbId, media_id: DbId, visibility: Visibility) -> Result<Self, CoreError> {
        if project_id <= 0 {
            return Err(CoreError::InvalidScope(format!(
                "project id must be positive, got {project_id}"
            )));
        }
        if media_id <= 0 {
            return Err(CoreError::InvalidScope(format!(
                "media id must be positive, got {media_id}"
            )));
        }
        Ok(Self {
            project_id,
            media_id,
            visibility,
        })
    }

    /// `{prefix}/{project}/media/{media}/labels`
    pub fn labels_path(&self) -> String {
        format!(
            "{}/{}/media/{}/labels",
            self.visibility.resource_prefix(),
            self.project_id,
            self.media_id
        )
    }

    pub fn edit_path(&self) -> String {
        format!("{}/edit", self.labels_path())
    }

    pub fn delete_path(&self) -> String {
        format!("{}/delete", self.labels_path())
    }

    pub fn export_path(&self) -> String {
        format!("{}/export", self.labels_path())
    }
}

/// The composite key under which one set of annotations is fetched and
/// saved: project, media, annotation type and (optionally) link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelScope {
    pub media: MediaScope,
    pub annotation_type: String,
    pub link_id: Option<DbId>,
}

impl LabelScope {
    pub fn new(media: MediaScope, annotation_type: impl Into<String>) -> Self {
        Self {
            media,
            annotation_type: annotation_type.into(),
            link_id: None,
        }
    }

    pub fn with_link(mut self, link_id: DbId) -> Self {
        self.link_id = Some(link_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_paths() {
        let scope = MediaScope::new(12, 34, Visibility::Private).unwrap();
        assert_eq!(scope.labels_path(), "/services/projects/12/media/34/labels");
        assert_eq!(scope.edit_path(), "/services/projects/12/media/34/labels/edit");
        assert_eq!(scope.delete_path(), "/services/projects/12/media/34/labels/delete");
        assert_eq!(scope.export_path(), "/services/projects/12/media/34/labels/export");
    }

    #[test]
    fn published_projects_use_public_namespace() {
        let scope = MediaScope::new(1, 2, Visibility::from_published(true)).unwrap();
        assert_eq!(scope.labels_path(), "/services/public/projects/1/media/2/labels");
    }

    #[test]
    fn scopes_of_differing_visibility_are_independent() {
        let private = MediaScope::new(1, 2, Visibility::Private).unwrap();
        let public = MediaScope::new(3, 4, Visibility::Public).unwrap();
        assert!(private.labels_path().starts_with(PRIVATE_PREFIX));
        assert!(public.labels_path().starts_with(PUBLIC_PREFIX));
    }

    #[test]
    fn non_positive_ids_rejected() {
        assert!(MediaScope::new(0, 2, Visibility::Private).is_err());
        let err = MediaScope::new(1, -2, Visibility::Private).unwrap_err();
        assert!(err.to_string().contains("media id"));
    }

    #[test]
    fn label_scope_link() {
        let media = MediaScope::new(1, 2, Visibility::Private).unwrap();
        let scope = LabelScope::new(media, "M").with_link(7);
        assert_eq!(scope.link_id, Some(7));
        assert_eq!(scope.annotation_type, "M");
    }
}
