use platform_authn::Principal;

use super::escape;

pub fn home(viewer: Option<&Principal>) -> String {
    match viewer {
        Some(user) if user.is_admin => format!(
            r#"<p>Signed in as <strong>{}</strong>.</p>
<p><a href="/admin">Open the admin panel</a> or <a href="/employees">browse employees</a>.</p>"#,
            escape(&user.name)
        ),
        Some(user) => format!(
            r#"<p>Signed in as <strong>{}</strong>.</p>
<p><a href="/employees">Browse employees</a>.</p>"#,
            escape(&user.name)
        ),
        None => r#"<p>Track employees, departments and professions.</p>
<p><a href="/login">Log in</a> or <a href="/register">create an account</a>.</p>"#
            .to_string(),
    }
}

pub fn register(offer_admin: bool) -> String {
    let admin = if offer_admin {
        r#"<label><input type="checkbox" name="admin" value="true"> Administrator</label>"#
    } else {
        ""
    };
    format!(
        r#"<form method="post" action="/register">
<label>Name <input type="text" name="name" required></label>
<label>Password <input type="password" name="password" required></label>
{admin}
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a>.</p>"#
    )
}

pub fn login() -> String {
    r#"<form method="post" action="/login">
<label>Name <input type="text" name="name" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/register">Register</a>.</p>"#
        .to_string()
}
