use askama::Template;

use crate::pkg::internal::candidate::CandidateRecord;

#[derive(Template)]
#[template(path = "home.html")]
pub struct Home<'a> {
    pub service_name: &'a str,
    pub token_default: &'a str,
}

#[derive(Template)]
#[template(path = "review.html")]
pub struct Review<'a> {
    pub service_name: &'a str,
    pub token: &'a str,
    pub records: &'a [CandidateRecord],
}
