mod gql;
