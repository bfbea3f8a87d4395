//! Terminal stand-ins for the browser surfaces: notifications and form input.

use myflix_client::{Director, Movie, User};
use myflix_views::{FormInput, LoginForm, Notification, Notifier, RegistrationForm};

/// Prints notifications as single lines on stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}  [{}]", notification.message, notification.action);
    }
}

/// Form input taken from command-line arguments.
///
/// Each form is submitted once; a failed submission dismisses the dialog.
#[derive(Debug, Default)]
pub struct ArgsInput {
    registration: Option<RegistrationForm>,
    login: Option<LoginForm>,
}

impl ArgsInput {
    pub fn registration(form: RegistrationForm) -> Self {
        Self {
            registration: Some(form),
            login: None,
        }
    }

    pub fn login(form: LoginForm) -> Self {
        Self {
            registration: None,
            login: Some(form),
        }
    }
}

impl FormInput for ArgsInput {
    fn registration_form(&mut self) -> Option<RegistrationForm> {
        self.registration.take()
    }

    fn login_form(&mut self) -> Option<LoginForm> {
        self.login.take()
    }
}

pub fn print_movie_line(movie: &Movie) {
    println!(
        "{} | {} | {}{}",
        movie.title,
        movie.genre.name(),
        movie.director.name(),
        if movie.featured { " | featured" } else { "" }
    );
}

pub fn print_movie(movie: &Movie) {
    println!("{}", movie.title);
    println!("  id:       {}", movie.id);
    println!("  genre:    {}", movie.genre.name());
    println!("  director: {}", movie.director.name());
    if !movie.actors.is_empty() {
        println!("  actors:   {}", movie.actors.join(", "));
    }
    if !movie.image_path.is_empty() {
        println!("  image:    {}", movie.image_path);
    }
    if !movie.description.is_empty() {
        println!();
        println!("{}", movie.description);
    }
}

pub fn print_director(director: &Director) {
    println!("{}", director.name);
    if let Some(birth) = director.birth {
        println!("  born: {}", birth.format("%Y-%m-%d"));
    }
    if let Some(death) = director.death {
        println!("  died: {}", death.format("%Y-%m-%d"));
    }
    if !director.bio.is_empty() {
        println!();
        println!("{}", director.bio);
    }
}

pub fn print_user(user: &User) {
    println!("{}", user.username);
    println!("  id:        {}", user.id);
    println!("  email:     {}", user.email);
    if let Some(birthday) = user.birthday {
        println!("  birthday:  {}", birthday.format("%Y-%m-%d"));
    }
    if !user.favorite_movies.is_empty() {
        println!("  favorites: {}", user.favorite_movies.join(", "));
    }
}
