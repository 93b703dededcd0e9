mod helpers;

mod api {
    mod auth;
    mod catalog;
    mod companies;
    mod jobs;
    mod profile;
    mod responses;
}

mod views {
    mod apply;
    mod employer_jobs;
    mod load_failures;
    mod skills;
}
