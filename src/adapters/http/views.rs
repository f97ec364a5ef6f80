//! HTML pages of the portal.
//!
//! Every piece of dynamic text goes through [`escape`], and names placed in URLs are
//! percent-encoded.

use crate::domain::{Club, Competition, MAX_PLACES_PER_BOOKING};

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | GUDLFT Registration</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn messages(body: &mut String, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    body.push_str("<ul class=\"messages\">\n");
    for message in messages {
        body.push_str(&format!("<li>{}</li>\n", escape(message)));
    }
    body.push_str("</ul>\n");
}

/// Landing page: login form and the public points table
pub fn index(clubs: &[Club], flashes: &[String]) -> String {
    let mut body = String::from("<h1>Welcome to the GUDLFT Registration Portal!</h1>\n");
    messages(&mut body, flashes);
    body.push_str(
        "<p>Please enter your secretary email to continue:</p>\n\
         <form action=\"/showSummary\" method=\"post\">\n\
         <label for=\"email\">Email:</label>\n\
         <input type=\"email\" name=\"email\" id=\"email\" placeholder=\"Enter your email\"/>\n\
         <button type=\"submit\">Enter</button>\n\
         </form>\n",
    );

    body.push_str(
        "<h2>Club Points Overview</h2>\n\
         <p>For transparency, here are the current points for each club:</p>\n\
         <table border=\"1\" style=\"border-collapse: collapse\">\n\
         <thead><tr><th>Club Name</th><th>Available Points</th></tr></thead>\n<tbody>\n",
    );
    for club in clubs {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(&club.name),
            club.points
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    page("Home", &body)
}

/// Summary page of a logged-in club
///
/// `club` is `None` when the name submitted by the browser does not match any club, in which
/// case only that name is shown.
pub fn welcome(
    club_name: &str,
    club: Option<&Club>,
    competitions: &[Competition],
    flashes: &[String],
) -> String {
    let mut body = String::new();
    match club {
        Some(club) => {
            body.push_str(&format!("<h2>Welcome, {}</h2>\n", escape(&club.email)));
            body.push_str(&format!("<p>Club: {}</p>\n", escape(&club.name)));
        }
        None => {
            body.push_str(&format!("<h2>Welcome, {}</h2>\n", escape(club_name)));
        }
    }
    body.push_str("<a href=\"/logout\">Logout</a>\n");
    messages(&mut body, flashes);
    if let Some(club) = club {
        body.push_str(&format!("<p>Points available: {}</p>\n", club.points));
    }

    body.push_str("<h3>Competitions:</h3>\n<ul>\n");
    for competition in competitions {
        body.push_str(&format!(
            "<li>{}<br/>Date: {}<br/>Number of Places: {}",
            escape(&competition.name),
            competition.date.format("%Y-%m-%d %H:%M:%S"),
            competition.number_of_places
        ));
        if competition.number_of_places > 0 {
            body.push_str(&format!(
                "<br/><a href=\"/book/{}/{}\">Book Places</a>",
                urlencoding::encode(club_name),
                urlencoding::encode(&competition.name)
            ));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");

    page("Summary", &body)
}

/// Booking form of a club for one competition
pub fn booking(club: &Club, competition: &Competition) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h2>{}</h2>\n", escape(&competition.name)));
    body.push_str(&format!("<p>Club: {}</p>\n", escape(&club.name)));
    body.push_str(&format!(
        "<p>Places available: {}</p>\n",
        competition.number_of_places
    ));
    body.push_str(&format!(
        "<form action=\"/purchasePlaces\" method=\"post\">\n\
         <input type=\"hidden\" name=\"club\" value=\"{}\">\n\
         <input type=\"hidden\" name=\"competition\" value=\"{}\">\n\
         <label for=\"places\">How many places?</label>\n\
         <input type=\"number\" name=\"places\" id=\"places\" min=\"1\" max=\"{}\"/>\n\
         <button type=\"submit\">Book</button>\n\
         </form>\n",
        escape(&club.name),
        escape(&competition.name),
        MAX_PLACES_PER_BOOKING
            .min(club.points)
            .min(competition.number_of_places)
    ));

    page(&format!("Booking for {}", competition.name), &body)
}

/// Page shown for requests that could not be served at all
pub fn error(status: u16, message: &str) -> String {
    let body = format!(
        "<h2>Error {status}</h2>\n<p>{}</p>\n<a href=\"/\">Back to the portal</a>\n",
        escape(message)
    );
    page("Error", &body)
}
