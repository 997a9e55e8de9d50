pub mod magazine_users;
