diesel::table! {
    contacts (id) {
        id -> Int8,
        lead_id -> Nullable<Varchar>,
        name -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        phone -> Nullable<Int8>,
        role -> Nullable<Varchar>,
        address_id -> Nullable<Int8>,
        contact_rewards_id -> Nullable<Int8>,
        photo -> Nullable<Varchar>,
        notes -> Nullable<Text>,
    }
}
