pub mod signed_in_user;
