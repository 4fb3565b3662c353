use askama::Template;

use crate::{extract::Form, pagination::Page, route::group::model::Group, view};

use super::model::{PostCard, PostForm};

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct IndexTemplate {
	pub viewer: Option<String>,
	pub page: Page<PostCard>,
}

#[derive(Template)]
#[template(path = "posts/post_detail.html")]
pub struct PostDetailTemplate {
	pub viewer: Option<String>,
	pub post: PostCard,
	pub author_post_count: i64,
	pub can_edit: bool,
}

/// An option of the group `<select>`.
pub struct GroupChoice {
	pub id: i64,
	pub title: String,
	pub selected: bool,
}

/// A post form as rendered, with the errors of each field.
pub struct PostFormView {
	pub text: String,
	pub groups: Vec<GroupChoice>,
	pub text_errors: Vec<String>,
	pub group_errors: Vec<String>,
}

impl PostFormView {
	pub fn new(form: &Form<PostForm>, groups: Vec<Group>) -> Self {
		let selected = form.data.group_id().ok().flatten();
		let groups = groups
			.into_iter()
			.map(|group| GroupChoice {
				selected: selected == Some(group.id),
				id: group.id,
				title: group.title,
			})
			.collect();

		Self {
			text: form.data.text.clone(),
			groups,
			text_errors: view::field_errors(&form.errors, "text"),
			group_errors: view::field_errors(&form.errors, "group"),
		}
	}
}

/// The create and edit post page.
#[derive(Template)]
#[template(path = "posts/create_post.html")]
pub struct PostFormTemplate {
	pub viewer: Option<String>,
	pub is_edit: bool,
	pub action: String,
	pub form: PostFormView,
}
